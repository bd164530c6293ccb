//! Error types for the loading boundary
//!
//! The simulation itself has no failure modes; only fetching the schedule
//! and reading tuning overrides can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the obstacle schedule. Fatal to startup.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read a tuning override file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}
