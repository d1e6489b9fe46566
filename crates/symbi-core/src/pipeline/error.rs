use thiserror::Error;

use crate::scoring::ScoringError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid request: {message}")]
    Validation { message: String },

    #[error("assessment not found: {id}")]
    NotFound { id: String },

    #[error("scoring timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl PipelineError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        PipelineError::Validation {
            message: message.into(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
