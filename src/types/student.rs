use super::{AcademicGroupCode, StudentId, SubjectCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One subject's enrollment record for a student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectEnrollment {
    #[serde(default, rename = "matriculado")]
    pub enrolled: bool,
    /// Optional explicit group override (rarely present upstream; read
    /// but not required by the core assignment algorithm, which derives
    /// group membership from `grupos_matriculado` directly).
    #[serde(default, rename = "grupo_override")]
    pub group_override: Option<AcademicGroupCode>,
}

/// A student: academic-group memberships plus per-subject enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    #[serde(skip)]
    pub id: StudentId,
    #[serde(default, rename = "grupos_matriculado")]
    pub academic_groups: Vec<AcademicGroupCode>,
    #[serde(default, rename = "asignaturas_matriculadas")]
    pub subjects: BTreeMap<SubjectCode, SubjectEnrollment>,
}

impl Student {
    pub fn is_enrolled_in(&self, subject: &SubjectCode) -> bool {
        self.subjects
            .get(subject)
            .map(|e| e.enrolled)
            .unwrap_or(false)
    }

    pub fn is_member_of(&self, group: &AcademicGroupCode) -> bool {
        self.academic_groups.contains(group)
    }
}
