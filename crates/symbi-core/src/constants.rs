//! Cross-cutting, shared constants.
//!
//! Thresholds in this module are part of the assessment contract: changing any of them
//! changes which records are disregarded, which are RLHF candidates, and which windows drift.

/// Minimum filtered word count for an artifact to be scored.
pub const MIN_WORD_COUNT: usize = 400;

/// Upper word-count bound for RLHF candidacy (inclusive).
pub const RLHF_MAX_WORD_COUNT: usize = 2500;

/// Minimum Reality Index for RLHF candidacy.
pub const RLHF_MIN_REALITY_INDEX: f64 = 7.0;

/// Minimum Ethical Alignment score for RLHF candidacy.
pub const RLHF_MIN_ETHICAL_SCORE: f64 = 4.0;

/// Minimum Canvas Parity for RLHF candidacy.
pub const RLHF_MIN_CANVAS_PARITY: u32 = 85;

/// Confidence below this value requires human review.
pub const HUMAN_REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Lower clamp for the computed confidence.
pub const MIN_CONFIDENCE: f64 = 0.65;

/// Upper clamp for the computed confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Variance below this value earns a consistency bonus of `CONSISTENCY_BONUS_CEILING - variance`.
pub const CONSISTENCY_BONUS_CEILING: f64 = 0.15;

/// Number of hex characters kept from the content digest.
///
/// 8 hex characters is 32 bits; see `hashing::content_fingerprint` for the collision budget.
pub const FINGERPRINT_HEX_LEN: usize = 8;

/// Extracted text longer than this is re-extracted with turn/sentence patterns.
pub const LARGE_CONTENT_GUARD_CHARS: usize = 100_000;

/// Re-extraction yielding more fragments than this falls back to the stripped text.
pub const MAX_EXTRACTED_FRAGMENTS: usize = 10_000;

/// Default processing timeout for background scoring.
pub const DEFAULT_PROCESSING_TIMEOUT_MS: u64 = 30_000;

/// Default EWMA smoothing factor.
pub const DEFAULT_DRIFT_ALPHA: f64 = 0.3;

/// Default control-limit multiplier (L in `L x sigma`).
pub const DEFAULT_DRIFT_CONTROL_LIMIT: f64 = 3.0;

/// Default number of complete records in the drift window (including the newest).
pub const DEFAULT_DRIFT_WINDOW: usize = 10;

/// Largest window accepted by the emergence read path.
pub const MAX_DRIFT_WINDOW: usize = 500;

/// Floor applied to the historical standard deviation.
pub const DRIFT_STD_FLOOR: f64 = 0.05;

/// Minimum number of points (history + newest) before drift is evaluated.
pub const DRIFT_MIN_POINTS: usize = 3;

/// Reality Index below this value counts towards the critical rate.
pub const CRITICAL_REALITY_THRESHOLD: f64 = 6.0;

/// Key prefix for assessment records in the key/value store.
pub const ASSESSMENT_KEY_PREFIX: &str = "assessment:";

/// Response header carrying the record status.
pub const SYMBI_STATUS_HEADER: &str = "X-Symbi-Status";
