//! Error types for the configuration and file-output surfaces.
//!
//! Calculations themselves are total and never fail; only loading a
//! household and writing results can.

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for planner I/O operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// One or more configuration problems, reported together.
    #[error("{}", join_errors(.0))]
    Config(Vec<ConfigError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for PlannerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(vec![err])
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
