use super::{SubjectCode, TeacherId, TimeRange, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Normalizes one teacher's `horarios_bloqueados` raw JSON value in
/// place, before typed deserialization: for each weekday, either a
/// list of time-range strings or a map whose keys are time-range
/// strings is valid input (spec.md's "list-or-map of time-ranges"),
/// and either shape collapses here to a plain list of
/// `normalize_time_range`-canonicalized strings. `blocked_ranges`
/// below can then derive `Deserialize` with no special-casing, and
/// `is_blocked`'s lookups compare against already-canonical values.
pub fn normalize_blocked_ranges_value(value: &mut serde_json::Value) {
    let serde_json::Value::Object(days) = value else {
        return;
    };
    for (_day, franjas) in days.iter_mut() {
        let normalized: Vec<String> = match franjas {
            serde_json::Value::Array(list) => list
                .iter()
                .filter_map(|v| v.as_str())
                .map(crate::normalizer::normalize_time_range)
                .collect(),
            serde_json::Value::Object(obj) => obj
                .keys()
                .map(|k| crate::normalizer::normalize_time_range(k))
                .collect(),
            _ => continue,
        };
        *franjas = serde_json::json!(normalized);
    }
}

/// A teacher: qualifications, working days, slot blocks and date
/// unavailability. A teacher is eligible for a (subject, weekday,
/// time-range) slot only if they teach the subject, work that
/// weekday, and the time-range is not blocked on that weekday; a
/// concrete meeting date also requires the date not be in
/// `unavailable_dates` (checked separately, per-meeting, since
/// eligibility is a slot property but unavailability is a date
/// property).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(skip)]
    pub id: TeacherId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellidos: String,
    #[serde(default, rename = "asignaturas_imparte")]
    pub taught_subjects: BTreeSet<SubjectCode>,
    #[serde(default, rename = "dias_trabajo")]
    pub working_days: BTreeSet<Weekday>,
    #[serde(default, rename = "horarios_bloqueados")]
    pub blocked_ranges: BTreeMap<Weekday, Vec<TimeRange>>,
    #[serde(default, rename = "fechas_no_disponibles")]
    pub unavailable_dates: BTreeSet<String>,
}

impl Teacher {
    /// "Nombre Apellidos", trimmed; "—" if both are empty.
    pub fn display_name(&self) -> String {
        let out = format!("{} {}", self.nombre.trim(), self.apellidos.trim())
            .trim()
            .to_string();
        if out.is_empty() {
            "—".to_string()
        } else {
            out
        }
    }

    pub fn teaches(&self, subject: &SubjectCode) -> bool {
        self.taught_subjects.contains(subject)
    }

    pub fn works_on(&self, day: Weekday) -> bool {
        self.working_days.contains(&day)
    }

    pub fn is_blocked(&self, day: Weekday, range: &TimeRange) -> bool {
        self.blocked_ranges
            .get(&day)
            .map(|ranges| ranges.contains(range))
            .unwrap_or(false)
    }

    /// Eligibility for a weekly slot, ignoring concrete dates (§3
    /// invariant, minus the per-date unavailability clause).
    pub fn eligible_for_slot(&self, subject: &SubjectCode, day: Weekday, range: &TimeRange) -> bool {
        self.teaches(subject) && self.works_on(day) && !self.is_blocked(day, range)
    }

    /// `true` iff `ddmmyyyy` is in the teacher's unavailable-dates set.
    pub fn is_unavailable_on(&self, ddmmyyyy: &str) -> bool {
        self.unavailable_dates.contains(ddmmyyyy.trim())
    }
}
