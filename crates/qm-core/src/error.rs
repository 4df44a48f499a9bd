use thiserror::Error;

pub type QmResult<T> = Result<T, QmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value} (expected {expected})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },
}
