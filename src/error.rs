use thiserror::Error;

/// Errors that can actually terminate a planning run. Business-logic
/// infeasibility never lands here — it is recorded as a
/// [`crate::types::Conflict`] instead (see `src/planner`).
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("failed to read configuration file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration JSON in '{file}': {message}")]
    ConfigParse { file: String, message: String },

    #[error("no configuration file found at '{path}' and no default location resolved")]
    ConfigMissing { path: String },
}

/// Use anyhow at application boundaries.
pub type Result<T> = anyhow::Result<T>;
