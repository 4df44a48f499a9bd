//! Error types for the qm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives frontends one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Race file error: {0}")]
    Project(String),

    #[error("Failed to read race file: {path}")]
    RaceFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Race validation failed: {0}")]
    Validation(String),

    #[error("Car not found: {0}")]
    CarNotFound(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for qm-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<qm_project::ProjectError> for AppError {
    fn from(err: qm_project::ProjectError) -> Self {
        match err {
            qm_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<qm_project::ValidationError> for AppError {
    fn from(err: qm_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<qm_sim::SimError> for AppError {
    fn from(err: qm_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}
