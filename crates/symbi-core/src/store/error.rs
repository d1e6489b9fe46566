use thiserror::Error;

/// Errors returned by [`KvStore`](super::KvStore) backends and the record repository.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("record serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// `true` when the backend itself cannot be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. } | StoreError::Io(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
