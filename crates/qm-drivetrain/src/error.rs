//! Error types for drivetrain construction and validation.

use qm_core::error::QmError;
use thiserror::Error;

/// Structural problems found while building or validating a car.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrivetrainError {
    #[error("Invalid torque curve: {reason}")]
    InvalidCurve { reason: String },

    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: String },
}

pub type DrivetrainResult<T> = Result<T, DrivetrainError>;

impl From<QmError> for DrivetrainError {
    fn from(e: QmError) -> Self {
        DrivetrainError::InvalidConfiguration {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DrivetrainError::InvalidCurve {
            reason: "empty".to_string(),
        };
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn core_error_becomes_configuration_error() {
        let core = QmError::OutOfRange {
            what: "mass",
            value: 0.0,
            expected: "> 0",
        };
        let err: DrivetrainError = core.into();
        match err {
            DrivetrainError::InvalidConfiguration { what } => assert!(what.contains("mass")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
