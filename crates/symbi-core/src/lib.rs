//! SYMBI assessment library (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`AssessmentPipeline`] - intake, dedup, background scoring and read paths
//! - [`PipelineConfig`], [`PipelineError`] - orchestrator settings and errors
//! - [`AssessmentRecord`], [`RecordStatus`] - persisted records
//!
//! ## Scoring
//! - [`canonicalize`], [`CanonicalContent`] - markup stripping, word count, fingerprint
//! - [`DeterministicScorer`], [`DimensionScoring`] - the five dimensions
//! - [`evaluate`], [`Evaluation`] - RLHF candidacy and confidence
//! - [`detect_drift`], [`EmergenceSummary`] - EWMA drift and critical rate
//!
//! ## Collaborators
//! - [`KvStore`] with [`MemoryStore`] and [`FileStore`]
//! - [`MetricsSink`] with [`NoopMetrics`] and [`InMemoryMetrics`]
//! - [`Config`] - environment configuration
//!
//! ## Test/Mock Support
//! Test doubles are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod canonical;
pub mod config;
pub mod constants;
pub mod drift;
pub mod evaluation;
pub mod hashing;
pub mod metrics;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod pipeline;
pub mod record;
pub mod scoring;
pub mod store;

pub use canonical::{CanonicalContent, canonicalize, count_words, extract_text};
pub use config::{Config, ConfigError};
pub use constants::{MIN_WORD_COUNT, SYMBI_STATUS_HEADER};
pub use drift::{
    DriftConfig, DriftReport, EmergenceSummary, critical_rate, detect_drift, is_critical,
};
pub use evaluation::{Evaluation, confidence, evaluate, is_rlhf_candidate};
pub use hashing::{content_fingerprint, hash_content, normalize_for_hash, rolling_hash, seeded_draw};
pub use metrics::{Counter, InMemoryMetrics, MetricsSink, MetricsSnapshot, NoopMetrics};
pub use pipeline::{
    ArtifactSubmission, AssessmentPipeline, DuplicateGroup, DuplicateMember, DuplicateReport,
    PipelineConfig, PipelineError, PipelineResult, RequestContext, ScorePreview, ScoringTask,
    SubmissionReceipt, SubmitOutcome, WordCountReport, word_count_report,
};
pub use record::{AssessmentRecord, DisregardReason, ErrorReason, RecordMetadata, RecordStatus};
pub use scoring::{
    CanvasParity, DeterministicScorer, DimensionScores, DimensionScoring, EthicalAlignment,
    RealityIndex, ResonanceLevel, ResonanceQuality, ScoringError, ScoringInput, TrustProtocol,
    TrustStatus,
};
pub use store::{AssessmentRepository, FileStore, KvStore, MemoryStore, StoreError, StoreResult};
