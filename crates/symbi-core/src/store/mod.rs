//! Key/value persistence for assessment records.
//!
//! [`KvStore`] is the byte-level collaborator (`get`/`set`/`del`/`get_by_prefix`).
//! [`AssessmentRepository`] layers typed JSON record access on top of any backend.

pub mod error;
pub mod file;
pub mod memory;
pub mod repository;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::AssessmentRepository;

use async_trait::async_trait;

/// Async key/value backend.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Returns `true` if the key existed.
    async fn del(&self, key: &str) -> StoreResult<bool>;

    /// All entries whose key starts with `prefix`, sorted by key.
    async fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;
}
