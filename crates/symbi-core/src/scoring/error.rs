use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("scoring cancelled")]
    Cancelled,

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
