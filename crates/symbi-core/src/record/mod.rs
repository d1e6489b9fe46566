//! Persisted assessment records and their state transitions.
//!
//! ```text
//! intake ──► auto_disregarded            (terminal)
//!   │
//!   ├──────► complete (duplicateOf = ..)  (terminal, copied from the original)
//!   │
//!   └──────► processing ──► complete
//!                      └──► error
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canonical::CanonicalContent;
use crate::constants::ASSESSMENT_KEY_PREFIX;
use crate::drift::EmergenceSummary;
use crate::evaluation::Evaluation;
use crate::scoring::DimensionScores;

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    AutoDisregarded,
    Processing,
    Complete,
    Error,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::AutoDisregarded => "auto_disregarded",
            RecordStatus::Processing => "processing",
            RecordStatus::Complete => "complete",
            RecordStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecordStatus::Processing)
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an artifact was disregarded at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisregardReason {
    WordCountBelowMinimum,
}

/// Why background scoring failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    ProcessingTimeout,
    ProcessingError,
}

impl ErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorReason::ProcessingTimeout => "processing_timeout",
            ErrorReason::ProcessingError => "processing_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub content_hash: String,
    /// Set once the record is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    pub human_review_required: bool,
    pub rlhf_candidate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disregard_reason: Option<DisregardReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<ErrorReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergence: Option<EmergenceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl RecordMetadata {
    fn pending(content_hash: &str, tenant_id: Option<&str>) -> Self {
        Self {
            content_hash: content_hash.to_string(),
            confidence_score: None,
            human_review_required: false,
            rlhf_candidate: false,
            duplicate_of: None,
            disregard_reason: None,
            error_reason: None,
            emergence: None,
            tenant_id: tenant_id.map(str::to_string),
        }
    }
}

/// One submitted artifact and its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: String,
    pub filename: String,
    pub word_count: usize,
    pub upload_timestamp: DateTime<Utc>,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<DimensionScores>,
    pub metadata: RecordMetadata,
}

impl AssessmentRecord {
    fn new(
        filename: &str,
        content: &CanonicalContent,
        status: RecordStatus,
        tenant_id: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            word_count: content.word_count,
            upload_timestamp: Utc::now(),
            status,
            assessment: None,
            metadata: RecordMetadata::pending(&content.content_hash, tenant_id),
        }
    }

    /// Terminal record for content below the word-count floor.
    pub fn disregarded(filename: &str, content: &CanonicalContent, tenant_id: Option<&str>) -> Self {
        let mut record = Self::new(filename, content, RecordStatus::AutoDisregarded, tenant_id);
        record.metadata.disregard_reason = Some(DisregardReason::WordCountBelowMinimum);
        record
    }

    /// Placeholder written before background scoring starts.
    pub fn processing(filename: &str, content: &CanonicalContent, tenant_id: Option<&str>) -> Self {
        Self::new(filename, content, RecordStatus::Processing, tenant_id)
    }

    /// Complete record that reuses the assessment of `original` without rescoring.
    pub fn duplicate(
        filename: &str,
        content: &CanonicalContent,
        original: &AssessmentRecord,
        tenant_id: Option<&str>,
    ) -> Self {
        let mut record = Self::new(filename, content, RecordStatus::Complete, tenant_id);
        record.assessment = original.assessment.clone();
        record.metadata.confidence_score = original.metadata.confidence_score;
        record.metadata.human_review_required = original.metadata.human_review_required;
        record.metadata.rlhf_candidate = original.metadata.rlhf_candidate;
        record.metadata.emergence = original.metadata.emergence;
        record.metadata.duplicate_of = Some(original.id.clone());
        record
    }

    /// Transitions to `complete`. Drift forces human review.
    pub fn completed(
        mut self,
        scores: DimensionScores,
        evaluation: Evaluation,
        emergence: EmergenceSummary,
    ) -> Self {
        self.status = RecordStatus::Complete;
        self.assessment = Some(scores);
        self.metadata.confidence_score = Some(evaluation.confidence);
        self.metadata.rlhf_candidate = evaluation.rlhf_candidate;
        self.metadata.human_review_required =
            evaluation.human_review_required || emergence.drift.drifting;
        self.metadata.emergence = Some(emergence);
        self
    }

    /// Transitions to `error`.
    pub fn failed(mut self, reason: ErrorReason) -> Self {
        self.status = RecordStatus::Error;
        self.metadata.error_reason = Some(reason);
        self
    }

    pub fn key(&self) -> String {
        record_key(&self.id)
    }

    pub fn content_hash(&self) -> &str {
        &self.metadata.content_hash
    }

    pub fn is_complete(&self) -> bool {
        self.status == RecordStatus::Complete
    }
}

/// Store key for a record id.
pub fn record_key(id: &str) -> String {
    format!("{ASSESSMENT_KEY_PREFIX}{id}")
}
