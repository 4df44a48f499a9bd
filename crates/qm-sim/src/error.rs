//! Error types for simulation runs.

use qm_drivetrain::DrivetrainError;
use thiserror::Error;

/// Reasons a run is refused or does not finish.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid torque curve: {reason}")]
    InvalidCurve { reason: String },

    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: String },

    #[error(
        "Run did not finish: {distance_m:.1} m of {target_m:.1} m covered in {time_s:.1} s"
    )]
    NonTerminatingRun {
        time_s: f64,
        distance_m: f64,
        target_m: f64,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<DrivetrainError> for SimError {
    fn from(e: DrivetrainError) -> Self {
        match e {
            DrivetrainError::InvalidCurve { reason } => SimError::InvalidCurve { reason },
            DrivetrainError::InvalidConfiguration { what } => {
                SimError::InvalidConfiguration { what }
            }
        }
    }
}

impl From<qm_core::error::QmError> for SimError {
    fn from(e: qm_core::error::QmError) -> Self {
        SimError::InvalidConfiguration {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_errors_keep_their_kind() {
        let err: SimError = DrivetrainError::InvalidCurve {
            reason: "empty".to_string(),
        }
        .into();
        assert!(matches!(err, SimError::InvalidCurve { .. }));
    }

    #[test]
    fn dnf_message_mentions_distance() {
        let err = SimError::NonTerminatingRun {
            time_s: 60.0,
            distance_m: 12.5,
            target_m: 402.336,
        };
        let msg = err.to_string();
        assert!(msg.contains("12.5"));
        assert!(msg.contains("402.3"));
    }
}
