use super::LabGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One group's entry under `resultados_organizacion.<semestre>.<asignatura>.grupos.<label>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrupoResultado {
    pub profesor: String,
    #[serde(rename = "profesor_id")]
    pub profesor_id: String,
    pub aula: String,
    pub dia: String,
    pub franja: String,
    /// Meeting dates, latest first.
    pub fechas: Vec<String>,
    pub alumnos: Vec<String>,
    pub capacidad: u32,
    pub mixta: bool,
    pub grupo_simple: String,
    pub grupo_doble: String,
}

impl From<&LabGroup> for GrupoResultado {
    fn from(g: &LabGroup) -> Self {
        Self {
            profesor: g.teacher_display.clone().unwrap_or_else(|| "—".to_string()),
            profesor_id: g.teacher_id.as_ref().map(|t| t.0.clone()).unwrap_or_default(),
            aula: g.room.as_ref().map(|r| r.0.clone()).unwrap_or_else(|| "—".to_string()),
            dia: g.weekday.label().to_string(),
            franja: g.time_range.0.clone(),
            fechas: g.dates.clone(),
            alumnos: g.students.iter().map(|s| s.0.clone()).collect(),
            capacidad: g.capacity,
            mixta: g.mixed,
            grupo_simple: g.simple_code.0.clone(),
            grupo_doble: g.dual_code.as_ref().map(|d| d.0.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsignaturaResultado {
    #[serde(default)]
    pub grupos: BTreeMap<String, GrupoResultado>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictoRegistro {
    pub semestre: String,
    pub asignatura: String,
    pub grupo: String,
    pub dia: String,
    pub franja: String,
    pub fecha: String,
    pub fechas: Vec<String>,
    pub aula: String,
    pub profesor: String,
    pub detalle: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conflictos {
    #[serde(default)]
    pub profesores: Vec<ConflictoRegistro>,
    #[serde(default)]
    pub aulas: Vec<ConflictoRegistro>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultadosMetadata {
    pub ultima_ejecucion: String,
    pub version: String,
}

/// `resultados_organizacion`: the complete output of one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultadosOrganizacion {
    pub datos_disponibles: bool,
    pub fecha_actualizacion: String,
    #[serde(default)]
    pub semestre_1: BTreeMap<String, AsignaturaResultado>,
    #[serde(default)]
    pub semestre_2: BTreeMap<String, AsignaturaResultado>,
    #[serde(default)]
    pub conflictos: Conflictos,
    #[serde(default)]
    pub avisos: Vec<String>,
    #[serde(rename = "_metadata", default)]
    pub metadata: ResultadosMetadata,
}

impl ResultadosOrganizacion {
    pub fn semester_map(&mut self, sem_key: &str) -> &mut BTreeMap<String, AsignaturaResultado> {
        match sem_key {
            "semestre_2" => &mut self.semestre_2,
            _ => &mut self.semestre_1,
        }
    }

    pub fn total_conflicts(&self) -> usize {
        self.conflictos.profesores.len() + self.conflictos.aulas.len()
    }
}
