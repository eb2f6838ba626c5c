//! Input Normalizer (§4.1): canonicalizes time ranges and dates.
//!
//! Grid-shape normalization lives in [`crate::types::normalize_grid_value`]
//! because it has to run on the raw `serde_json::Value` document, before
//! typed deserialization — everything here is a pure string transform
//! and stays independent of the document shape.
//!
//! Every function here is tolerant by design: on non-matching input it
//! returns the trimmed original rather than erroring. Upstream editors
//! produce heterogeneous legacy shapes and the engine must not abort on
//! cosmetic inconsistencies (§4.1 failure semantics, §9 design note).

/// Normalizes `H:MM-H:MM` or `HH:MM-HH:MM`, with optional surrounding
/// whitespace, into `HH:MM-HH:MM`. Non-matching input is returned
/// trimmed, unchanged.
pub fn normalize_time_range(raw: &str) -> String {
    let s = raw.trim();
    let Some((start, end)) = s.split_once('-') else {
        return s.to_string();
    };
    let (Some(start), Some(end)) = (parse_hm(start), parse_hm(end)) else {
        return s.to_string();
    };
    format!("{:02}:{:02}-{:02}:{:02}", start.0, start.1, end.0, end.1)
}

fn parse_hm(s: &str) -> Option<(u32, u32)> {
    let s = s.trim();
    let (h, m) = s.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.chars().all(|c| c.is_ascii_digit()) || !m.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}

/// Converts `DD/MM/YYYY` to ISO `YYYY-MM-DD`. Non-matching input is
/// returned trimmed, unchanged.
pub fn ddmmyyyy_to_iso(raw: &str) -> String {
    let s = raw.trim();
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 || parts[0].len() != 2 || parts[1].len() != 2 || parts[2].len() != 4 {
        return s.to_string();
    }
    if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return s.to_string();
    }
    format!("{}-{}-{}", parts[2], parts[1], parts[0])
}

/// Converts ISO `YYYY-MM-DD` to `DD/MM/YYYY`. Non-matching input is
/// returned trimmed, unchanged.
pub fn iso_to_ddmmyyyy(raw: &str) -> String {
    let s = raw.trim();
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return s.to_string();
    }
    if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return s.to_string();
    }
    format!("{}/{}/{}", parts[2], parts[1], parts[0])
}

fn looks_like_iso(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
}

/// Accepts either ISO or `DD/MM/YYYY` and returns ISO, tolerant of
/// anything else (returned trimmed, unchanged).
pub fn to_iso(raw: &str) -> String {
    let s = raw.trim();
    if looks_like_iso(s) {
        s.to_string()
    } else {
        ddmmyyyy_to_iso(s)
    }
}

/// Accepts either ISO or `DD/MM/YYYY` and returns `DD/MM/YYYY`.
pub fn to_ddmmyyyy(raw: &str) -> String {
    let s = raw.trim();
    if looks_like_iso(s) {
        iso_to_ddmmyyyy(s)
    } else {
        s.to_string()
    }
}

/// Sorts a list of `DD/MM/YYYY` strings latest-first. Unparseable
/// entries sort as if dated `0000-00-00` (earliest), matching the
/// original's defensive key function.
pub fn sort_ddmmyyyy_desc(dates: &mut [String]) {
    dates.sort_by_key(|d| std::cmp::Reverse(ddmmyyyy_sort_key(d)));
}

fn ddmmyyyy_sort_key(s: &str) -> (u32, u32, u32) {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 3 {
        return (0, 0, 0);
    }
    let (Ok(d), Ok(m), Ok(y)) = (
        parts[0].parse::<u32>(),
        parts[1].parse::<u32>(),
        parts[2].parse::<u32>(),
    ) else {
        return (0, 0, 0);
    };
    (y, m, d)
}
