//! Assessment pipeline orchestration.
//!
//! ```text
//! submit ─► canonicalize ─► wordCount < 400 ? ─► auto_disregarded
//!                 │
//!                 ├─► fingerprint seen? ─► complete (duplicateOf)
//!                 │
//!                 └─► processing ─► [spawn] score ─┬─► evaluate ─► drift window ─► complete
//!                                    (timeout)     └─► error
//! ```
//!
//! Background results are written with a guarded write that only replaces a record that
//! is still `processing`; a timed-out, cancelled or deleted record is never overwritten.
//! Two concurrent submissions of identical content can both miss the dedup check and both
//! be scored.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod types;


pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{AssessmentPipeline, word_count_report};
pub use types::{
    ArtifactSubmission, DuplicateGroup, DuplicateMember, DuplicateReport, RequestContext,
    ScorePreview, ScoringTask, SubmissionReceipt, SubmitOutcome, WordCountReport,
};
