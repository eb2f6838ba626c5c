use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized `HH:MM-HH:MM` time range, 24-hour, zero-padded.
///
/// Always constructed through [`crate::normalizer::normalize_time_range`];
/// the newtype itself does not re-validate, it only carries the
/// already-canonical string so it can't be confused with a raw,
/// possibly-unnormalized input string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeRange(pub String);

impl TimeRange {
    /// Start-of-range minutes since midnight, used as a sort key.
    /// Returns 0 if the string isn't in canonical form (defensive
    /// default for malformed grid input that slipped through).
    pub fn start_minutes(&self) -> u32 {
        let Some((start, _)) = self.0.split_once('-') else {
            return 0;
        };
        let Some((h, m)) = start.split_once(':') else {
            return 0;
        };
        let (Ok(h), Ok(m)) = (h.parse::<u32>(), m.parse::<u32>()) else {
            return 0;
        };
        h * 60 + m
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
