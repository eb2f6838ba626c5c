use super::Weekday;
use serde::{Deserialize, Serialize};

/// One entry in the academic calendar. `assigned_weekday` may differ
/// from the ISO date's natural weekday (holiday compensation moves a
/// Tuesday's classes onto a date that falls on a Monday); the planner
/// always consumes `assigned_weekday`, never a weekday derived from
/// `date` itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    #[serde(rename = "fecha")]
    pub date_raw: String,
    #[serde(rename = "horario_asignado")]
    pub assigned_weekday: Weekday,
}

impl CalendarDay {
    /// The date in ISO `YYYY-MM-DD` form, accepting either ISO or
    /// `DD/MM/YYYY` input (tolerant, per the Input Normalizer).
    pub fn iso_date(&self) -> String {
        crate::normalizer::to_iso(&self.date_raw)
    }

    /// The date in `DD/MM/YYYY` form for external emission.
    pub fn ddmmyyyy(&self) -> String {
        crate::normalizer::to_ddmmyyyy(&self.date_raw)
    }
}
