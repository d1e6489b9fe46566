//! Deterministic five-dimension scoring.
//!
//! [`DeterministicScorer`] derives every sub-score from keyword density in the extracted
//! text plus a pseudo-random draw seeded by the content fingerprint (see
//! [`seeded_draw`](crate::hashing::seeded_draw)). Nothing depends on wall-clock time or
//! process state, so the same artifact scores identically across restarts.
//!
//! The scorer is synchronous and CPU-bound; the pipeline runs it on a blocking thread and
//! hands it a [`CancellationToken`](tokio_util::sync::CancellationToken) that is checked
//! between dimensions.

pub mod error;
pub mod keywords;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::{DeterministicScorer, DimensionScoring};
pub use types::{
    CanvasParity, DimensionScores, EthicalAlignment, RealityIndex, ResonanceLevel,
    ResonanceQuality, ScoringInput, TrustProtocol, TrustStatus,
};
