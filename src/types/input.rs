use super::{
    AcademicGroupCode, AsignaturaEntry, CalendarDay, HorarioEntry, Room, RoomName, Student,
    StudentId, SubjectCode, Teacher, TeacherId,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `configuracion.horarios`. Subjects within a semester are kept in
/// input insertion order (§5: contended teachers/rooms are claimed in
/// subject-code insertion order), so the inner map is an `IndexMap`
/// rather than a `BTreeMap`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Horarios {
    #[serde(default)]
    pub datos: BTreeMap<String, IndexMap<SubjectCode, HorarioEntry>>,
}

/// `configuracion.asignaturas`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Asignaturas {
    #[serde(default)]
    pub datos: BTreeMap<SubjectCode, AsignaturaEntry>,
}

/// `configuracion.alumnos`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Alumnos {
    #[serde(default)]
    pub datos: BTreeMap<StudentId, Student>,
}

/// `configuracion.profesores`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profesores {
    #[serde(default)]
    pub datos: BTreeMap<TeacherId, Teacher>,
}

/// `configuracion.aulas`. Rooms are kept in input insertion order
/// (§4.3: "remaining eligible rooms in insertion order"), so this is
/// an `IndexMap` rather than a `BTreeMap`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Aulas {
    #[serde(default)]
    pub datos: IndexMap<RoomName, Room>,
}

/// `configuracion.calendario.datos`: one map of calendar entries per
/// semester.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalendarioDatos {
    #[serde(default, rename = "semestre_1")]
    pub semestre_1: BTreeMap<String, CalendarDay>,
    #[serde(default, rename = "semestre_2")]
    pub semestre_2: BTreeMap<String, CalendarDay>,
}

/// `configuracion.calendario`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Calendario {
    #[serde(default)]
    pub datos: CalendarioDatos,
}

/// The `configuracion` section of the document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Configuracion {
    #[serde(default)]
    pub horarios: Horarios,
    #[serde(default)]
    pub asignaturas: Asignaturas,
    #[serde(default)]
    pub alumnos: Alumnos,
    #[serde(default)]
    pub profesores: Profesores,
    #[serde(default)]
    pub aulas: Aulas,
    #[serde(default)]
    pub calendario: Calendario,
}

/// The whole configuration document: everything the planner reads,
/// plus whatever result/metadata sections already exist so a re-run
/// can overwrite just `resultados_organizacion` without disturbing
/// unrelated top-level keys (editors, export settings, etc. are out
/// of this engine's remit but must round-trip through it intact).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub configuracion: Configuracion,
    #[serde(default, rename = "resultados_organizacion")]
    pub resultados_organizacion: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ConfigDocument {
    /// Normalizes the weekly schedule grids for every (semester,
    /// subject) in place (§4.1), then assigns every id-keyed record's
    /// skipped id field from its map key — `serde`'s `BTreeMap<K, V>`
    /// deserialization has no way to write the key back into `V`.
    pub fn prepare(mut self) -> Self {
        for (id, student) in self.configuracion.alumnos.datos.iter_mut() {
            student.id = id.clone();
        }
        for (id, teacher) in self.configuracion.profesores.datos.iter_mut() {
            teacher.id = id.clone();
        }
        for (name, room) in self.configuracion.aulas.datos.iter_mut() {
            room.name = name.clone();
        }
        self
    }

    /// Normalizes every schedule grid's legacy cell shapes and every
    /// teacher's blocked-ranges shape in the raw JSON value before
    /// typed deserialization — this is the only stage at which the
    /// legacy list-vs-map shapes can still be distinguished (§4.1).
    pub fn normalize_raw(mut value: serde_json::Value) -> serde_json::Value {
        if let Some(datos) = value
            .pointer_mut("/configuracion/horarios/datos")
            .and_then(|v| v.as_object_mut())
        {
            for (_semester, subjects) in datos.iter_mut() {
                let Some(subjects) = subjects.as_object_mut() else {
                    continue;
                };
                for (_subject, entry) in subjects.iter_mut() {
                    let Some(entry) = entry.as_object_mut() else {
                        continue;
                    };
                    if let Some(grid) = entry.get_mut("horarios_grid") {
                        super::normalize_grid_value(grid);
                    }
                }
            }
        }

        if let Some(profesores) = value
            .pointer_mut("/configuracion/profesores/datos")
            .and_then(|v| v.as_object_mut())
        {
            for (_id, teacher) in profesores.iter_mut() {
                let Some(teacher) = teacher.as_object_mut() else {
                    continue;
                };
                if let Some(bloqueados) = teacher.get_mut("horarios_bloqueados") {
                    super::normalize_blocked_ranges_value(bloqueados);
                }
            }
        }

        value
    }

    pub fn academic_group_code(code: &str) -> AcademicGroupCode {
        AcademicGroupCode(code.to_string())
    }
}

/// Tuning knobs the planner exposes beyond its hardcoded defaults —
/// all optional, loaded from an optional `lab_scheduler.toml` alongside
/// the data document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanningConfig {
    /// Capacity assumed for a "none" room placeholder.
    #[serde(default = "default_unconstrained_capacity")]
    pub unconstrained_capacity: u32,
}

fn default_unconstrained_capacity() -> u32 {
    10_000
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            unconstrained_capacity: default_unconstrained_capacity(),
        }
    }
}
