use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for subject codes (e.g. "FIS201").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectCode(pub String);

/// Newtype for student identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Newtype for teacher identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub String);

/// Newtype for room names, which double as their identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomName(pub String);

/// Newtype for academic group codes (e.g. "A404", "EE403").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AcademicGroupCode(pub String);

macro_rules! display_via_inner {
    ($t:ty) => {
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

display_via_inner!(SubjectCode);
display_via_inner!(StudentId);
display_via_inner!(TeacherId);
display_via_inner!(RoomName);
display_via_inner!(AcademicGroupCode);

impl AsRef<str> for AcademicGroupCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
