use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::record::RecordStatus;
use crate::scoring::DimensionScores;

/// A raw artifact as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactSubmission {
    pub filename: String,
    pub content: String,
}

impl ArtifactSubmission {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Caller identity attached by the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub user_id: String,
    pub tenant_id: String,
    pub role: String,
}

impl RequestContext {
    pub const ANONYMOUS_USER: &'static str = "anonymous";
    pub const DEFAULT_TENANT: &'static str = "default";
    pub const DEFAULT_ROLE: &'static str = "user";
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            user_id: Self::ANONYMOUS_USER.to_string(),
            tenant_id: Self::DEFAULT_TENANT.to_string(),
            role: Self::DEFAULT_ROLE.to_string(),
        }
    }
}

/// Synchronous answer to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub assessment_id: String,
    pub status: RecordStatus,
    pub content_hash: String,
    pub word_count: usize,
}

/// Handle to a detached scoring task.
#[derive(Debug)]
pub struct ScoringTask {
    handle: JoinHandle<()>,
    token: CancellationToken,
}

impl ScoringTask {
    pub(crate) fn new(handle: JoinHandle<()>, token: CancellationToken) -> Self {
        Self { handle, token }
    }

    /// Waits until the record has left `processing` (or the result was discarded).
    pub async fn wait(self) -> Result<(), JoinError> {
        self.handle.await
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Receipt plus the background task, when one was started.
///
/// Dropping the outcome leaves the task running.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub receipt: SubmissionReceipt,
    pub task: Option<ScoringTask>,
}

impl SubmitOutcome {
    /// Waits for the background task, if any.
    pub async fn settle(self) -> SubmissionReceipt {
        if let Some(task) = self.task {
            let _ = task.wait().await;
        }
        self.receipt
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMember {
    pub id: String,
    pub filename: String,
    pub upload_timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<String>,
}

/// Complete records sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub content_hash: String,
    pub count: usize,
    /// `true` when every member carries an identical assessment.
    pub consistent: bool,
    pub records: Vec<DuplicateMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReport {
    pub total_groups: usize,
    pub inconsistent_groups: usize,
    pub groups: Vec<DuplicateGroup>,
}

/// Scores for content that is not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePreview {
    pub content_hash: String,
    pub word_count: usize,
    pub assessment: DimensionScores,
    pub confidence_score: f64,
    pub rlhf_candidate: bool,
    pub human_review_required: bool,
}

/// Canonicalizer output for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCountReport {
    pub word_count: usize,
    pub raw_length: usize,
    pub extracted_length: usize,
    pub preview: String,
}
