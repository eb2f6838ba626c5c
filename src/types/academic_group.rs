use super::AcademicGroupCode;

/// Whether an academic group code belongs to a single-degree (`LNNN`,
/// e.g. `A404`) or a double-degree (`LLNNN`, e.g. `EE403`) cohort.
///
/// Classified once per code via [`AcademicGroupKind::classify`] rather
/// than re-matching the pattern at every decision site (design note:
/// represent the kind as a tagged variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcademicGroupKind {
    Simple,
    Dual,
}

impl AcademicGroupKind {
    /// Classifies a code by its letter-prefix length: one uppercase
    /// letter followed by three digits is `Simple`; two uppercase
    /// letters followed by three digits is `Dual`. Anything else is
    /// unclassifiable (`None`) — the caller treats that as "not a
    /// recognizable academic-group code" rather than panicking.
    pub fn classify(code: &str) -> Option<Self> {
        let letters = code.chars().take_while(|c| c.is_ascii_uppercase()).count();
        let digits = &code[letters..];
        let digits_ok = digits.len() == 3 && digits.chars().all(|c| c.is_ascii_digit());
        if !digits_ok {
            return None;
        }
        match letters {
            1 => Some(AcademicGroupKind::Simple),
            2 => Some(AcademicGroupKind::Dual),
            _ => None,
        }
    }
}

/// An administrative cohort a student belongs to. Distinct from a
/// [`super::LabGroup`], which is the scheduled output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicGroup {
    pub code: AcademicGroupCode,
    pub kind: AcademicGroupKind,
}

impl AcademicGroup {
    pub fn new(code: AcademicGroupCode) -> Option<Self> {
        let kind = AcademicGroupKind::classify(&code.0)?;
        Some(Self { code, kind })
    }
}

/// True iff the code list contains at least one simple-pattern code
/// and at least one dual-pattern code.
pub fn compute_mixed(codes: &[AcademicGroupCode]) -> bool {
    let has_simple = codes
        .iter()
        .any(|c| AcademicGroupKind::classify(&c.0) == Some(AcademicGroupKind::Simple));
    let has_dual = codes
        .iter()
        .any(|c| AcademicGroupKind::classify(&c.0) == Some(AcademicGroupKind::Dual));
    has_simple && has_dual
}
