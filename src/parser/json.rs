//! Configuration document load/save (§6): a generic JSON-loader
//! pattern plus a raw-JSON normalization pass that must run before
//! typed deserialization.

use crate::error::PlanningError;
use crate::types::{ConfigDocument, PlanningConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads a configuration document from `path`, normalizing legacy
/// schedule-grid shapes and back-filling skipped id fields before
/// returning it (§4.1, §6).
pub fn load_config(path: &Path) -> crate::error::Result<ConfigDocument> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| PlanningError::ConfigRead {
        path: path_str.clone(),
        source: e,
    })?;

    let raw: serde_json::Value = serde_json::from_str(&content).map_err(|e| PlanningError::ConfigParse {
        file: path_str.clone(),
        message: e.to_string(),
    })?;
    let raw = ConfigDocument::normalize_raw(raw);

    let document: ConfigDocument = serde_json::from_value(raw).map_err(|e| PlanningError::ConfigParse {
        file: path_str,
        message: e.to_string(),
    })?;

    Ok(document.prepare())
}

/// Writes the document back to `path`, pretty-printed and without
/// ASCII-escaping non-Latin characters.
pub fn save_config(path: &Path, document: &ConfigDocument) -> crate::error::Result<()> {
    let path_str = path.display().to_string();
    let json = serde_json::to_string_pretty(document).map_err(|e| PlanningError::ConfigParse {
        file: path_str.clone(),
        message: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| PlanningError::ConfigRead {
        path: path_str,
        source: e,
    })?;
    Ok(())
}

/// Loads planner tuning knobs from a TOML file, or falls back to
/// defaults if the file is absent or malformed — tuning is additive,
/// never required (§6 ambient config).
pub fn load_planning_config(path: &Path) -> PlanningConfig {
    if !path.exists() {
        return PlanningConfig::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_default(),
        Err(_) => PlanningConfig::default(),
    }
}

/// Default configuration location: two directories above the crate
/// root. Returns `None` if nothing exists there.
pub fn find_default_config() -> Option<PathBuf> {
    let candidate = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()?
        .parent()?
        .join("configuracion_labs.json");
    candidate.exists().then_some(candidate)
}
