//! Top-level orchestration (§2 data flow): wires the Enrollment Index,
//! Resource Tracker, and Subject Planner together over every
//! `(semester, subject)` pair and assembles the result document.

use crate::enrollment::EnrollmentIndex;
use crate::planner;
use crate::tracker::ResourceTracker;
use crate::types::{
    ConfigDocument, Conflict, ConflictKind, ConflictoRegistro, Conflictos, GrupoResultado,
    PlanningConfig, ResultadosMetadata, ResultadosOrganizacion,
};

/// Runs the full planning pipeline over `document` and returns it with
/// `resultados_organizacion` overwritten. Never fails: every
/// infeasibility becomes a conflict or advisory inside the result
/// (§7) — only configuration load/parse failures are fatal, and those
/// are surfaced by `src/parser` before this function is ever called.
pub fn ejecutar(mut document: ConfigDocument, config: &PlanningConfig) -> ConfigDocument {
    let enrollment = EnrollmentIndex::build(&document.configuracion.alumnos);
    let mut advisories: Vec<String> = Vec::new();
    let mut raw_conflicts: Vec<Conflict> = Vec::new();
    let mut semestre_1 = std::collections::BTreeMap::new();
    let mut semestre_2 = std::collections::BTreeMap::new();

    {
        let profs = &document.configuracion.profesores;
        let aulas = &document.configuracion.aulas;
        let mut tracker = ResourceTracker::new(profs, aulas, config.unconstrained_capacity);

        for (semester_key, subjects) in &document.configuracion.horarios.datos {
            let calendar = if semester_key == "semestre_2" {
                &document.configuracion.calendario.datos.semestre_2
            } else {
                &document.configuracion.calendario.datos.semestre_1
            };

            for (subject_code, horario) in subjects {
                let Some(asignatura) = document.configuracion.asignaturas.datos.get(subject_code) else {
                    advisories.push(format!(
                        "{subject_code}: referenced in the schedule grid but absent from the subjects table, skipped"
                    ));
                    continue;
                };

                let groups = planner::plan_subject(
                    semester_key,
                    subject_code,
                    asignatura,
                    horario,
                    &enrollment,
                    calendar,
                    &mut tracker,
                    &mut raw_conflicts,
                    &mut advisories,
                );

                if groups.is_empty() {
                    continue;
                }

                let bucket = if semester_key == "semestre_2" {
                    &mut semestre_2
                } else {
                    &mut semestre_1
                };
                let entry: &mut crate::types::AsignaturaResultado =
                    bucket.entry(subject_code.0.clone()).or_default();
                for group in &groups {
                    entry.grupos.insert(group.label.clone(), GrupoResultado::from(group));
                }
            }
        }
    }

    let mut conflictos = Conflictos::default();
    for conflict in raw_conflicts {
        let registro = ConflictoRegistro {
            semestre: conflict.semester.clone(),
            asignatura: conflict.subject.0.clone(),
            grupo: conflict.group_label.clone(),
            dia: conflict.weekday.label().to_string(),
            franja: conflict.time_range.0.clone(),
            fecha: conflict.candidate_date.clone().unwrap_or_default(),
            fechas: conflict.candidate_dates.clone(),
            aula: conflict.room.clone().unwrap_or_default(),
            profesor: conflict.teacher.clone().unwrap_or_default(),
            detalle: format!("{}: {}", conflict.kind.as_str(), conflict.detail),
        };
        match conflict.kind {
            ConflictKind::NoRoomSlot => conflictos.aulas.push(registro),
            _ => conflictos.profesores.push(registro),
        }
    }

    let now = chrono::Utc::now().to_rfc3339();
    let resultados = ResultadosOrganizacion {
        datos_disponibles: true,
        fecha_actualizacion: now.clone(),
        semestre_1,
        semestre_2,
        conflictos,
        avisos: advisories,
        metadata: ResultadosMetadata {
            ultima_ejecucion: now,
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    document.resultados_organizacion =
        Some(serde_json::to_value(&resultados).unwrap_or(serde_json::Value::Null));
    document
}
