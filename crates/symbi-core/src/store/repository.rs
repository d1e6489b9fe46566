use crate::constants::ASSESSMENT_KEY_PREFIX;
use crate::record::{AssessmentRecord, record_key};

use super::KvStore;
use super::error::{StoreError, StoreResult};

/// Typed access to [`AssessmentRecord`]s stored as JSON under `assessment:<id>`.
#[derive(Debug, Clone)]
pub struct AssessmentRepository<S> {
    store: S,
}

impl<S: KvStore> AssessmentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<AssessmentRecord>> {
        match self.store.get(&record_key(id)).await? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    pub async fn put(&self, record: &AssessmentRecord) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(&record.key(), bytes).await
    }

    /// Returns `true` if a record was removed.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.del(&record_key(id)).await
    }

    /// Every record, in key order.
    pub async fn list(&self) -> StoreResult<Vec<AssessmentRecord>> {
        self.store
            .get_by_prefix(ASSESSMENT_KEY_PREFIX)
            .await?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }

    /// Complete records in upload order, oldest first.
    pub async fn list_complete(&self) -> StoreResult<Vec<AssessmentRecord>> {
        let mut records: Vec<_> = self
            .list()
            .await?
            .into_iter()
            .filter(AssessmentRecord::is_complete)
            .collect();
        records.sort_by(|a, b| {
            a.upload_timestamp
                .cmp(&b.upload_timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    /// Earliest complete record with `content_hash`, if any.
    pub async fn find_complete_by_hash(
        &self,
        content_hash: &str,
    ) -> StoreResult<Option<AssessmentRecord>> {
        Ok(self
            .list_complete()
            .await?
            .into_iter()
            .find(|record| record.content_hash() == content_hash))
    }
}

fn decode(bytes: &[u8]) -> StoreResult<AssessmentRecord> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
