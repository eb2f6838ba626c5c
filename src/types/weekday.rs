use serde::{Deserialize, Serialize};
use std::fmt;

/// A weekday, ordered Monday-first as the scheduling grid expects.
///
/// Spanish labels (with or without accents) all resolve to one of these
/// variants through [`Weekday::parse`] — callers should never compare
/// raw label strings directly (see design note on scattered equality
/// checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    /// Parses a Spanish weekday label, accented or not. Returns `None`
    /// for anything unrecognized rather than guessing.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Lunes" | "lunes" => Some(Weekday::Lunes),
            "Martes" | "martes" => Some(Weekday::Martes),
            "Miércoles" | "miércoles" | "Miercoles" | "miercoles" => Some(Weekday::Miercoles),
            "Jueves" | "jueves" => Some(Weekday::Jueves),
            "Viernes" | "viernes" => Some(Weekday::Viernes),
            "Sábado" | "sábado" | "Sabado" | "sabado" => Some(Weekday::Sabado),
            "Domingo" | "domingo" => Some(Weekday::Domingo),
            _ => None,
        }
    }

    /// Ordinal used for sorting (Monday = 0 .. Sunday = 6).
    pub fn ordinal(self) -> u8 {
        match self {
            Weekday::Lunes => 0,
            Weekday::Martes => 1,
            Weekday::Miercoles => 2,
            Weekday::Jueves => 3,
            Weekday::Viernes => 4,
            Weekday::Sabado => 5,
            Weekday::Domingo => 6,
        }
    }

    /// Canonical (accented) Spanish label, used when re-emitting results.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Weekday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Weekday::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized weekday: {raw}")))
    }
}
