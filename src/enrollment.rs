//! Enrollment Index (§4.2): a pure function from student records to
//! `(academic-group, subject) -> sorted student ids`, built once per
//! planning run.

use crate::types::{AcademicGroupCode, Alumnos, StudentId, SubjectCode};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct EnrollmentIndex {
    by_group_subject: BTreeMap<(AcademicGroupCode, SubjectCode), Vec<StudentId>>,
}

impl EnrollmentIndex {
    /// Builds the index. Only students with an explicit
    /// `enrolled = true` record for the subject are included; lists
    /// are sorted lexicographically by student id for determinism.
    pub fn build(alumnos: &Alumnos) -> Self {
        let mut by_group_subject: BTreeMap<(AcademicGroupCode, SubjectCode), Vec<StudentId>> =
            BTreeMap::new();
        for student in alumnos.datos.values() {
            for (subject, enrollment) in &student.subjects {
                if !enrollment.enrolled {
                    continue;
                }
                for group in &student.academic_groups {
                    by_group_subject
                        .entry((group.clone(), subject.clone()))
                        .or_default()
                        .push(student.id.clone());
                }
            }
        }
        for ids in by_group_subject.values_mut() {
            ids.sort();
        }
        Self { by_group_subject }
    }

    pub fn students_of(&self, group: &AcademicGroupCode, subject: &SubjectCode) -> Vec<StudentId> {
        self.by_group_subject
            .get(&(group.clone(), subject.clone()))
            .cloned()
            .unwrap_or_default()
    }
}
