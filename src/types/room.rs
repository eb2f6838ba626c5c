use super::{RoomName, SubjectCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A physical laboratory room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(skip)]
    pub name: RoomName,
    #[serde(default, rename = "capacidad")]
    pub capacity: u32,
    #[serde(default, rename = "disponible")]
    pub available: bool,
    #[serde(default, rename = "asignaturas_asociadas")]
    pub associated_subjects: BTreeSet<SubjectCode>,
    #[serde(default, rename = "fechas_no_disponibles")]
    pub unavailable_dates: BTreeSet<String>,
}

impl Room {
    /// A room is eligible for `subject` only if available and
    /// associated (§3 invariant).
    pub fn eligible_for(&self, subject: &SubjectCode) -> bool {
        self.available && self.associated_subjects.contains(subject)
    }

    pub fn is_unavailable_on(&self, ddmmyyyy: &str) -> bool {
        self.unavailable_dates.contains(ddmmyyyy.trim())
    }
}
