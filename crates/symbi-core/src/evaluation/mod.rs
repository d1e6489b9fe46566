//! RLHF candidacy and confidence derived from dimension scores.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONSISTENCY_BONUS_CEILING, HUMAN_REVIEW_CONFIDENCE_THRESHOLD, MAX_CONFIDENCE,
    MIN_CONFIDENCE, MIN_WORD_COUNT, RLHF_MAX_WORD_COUNT, RLHF_MIN_CANVAS_PARITY,
    RLHF_MIN_ETHICAL_SCORE, RLHF_MIN_REALITY_INDEX,
};
use crate::scoring::{DimensionScores, TrustStatus};

/// Secondary fields derived from a scored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub rlhf_candidate: bool,
    pub confidence: f64,
    pub human_review_required: bool,
}

/// Evaluates candidacy, confidence and the review flag. Drift overrides are applied by the caller.
pub fn evaluate(word_count: usize, scores: &DimensionScores) -> Evaluation {
    let unrounded = unrounded_confidence(scores);
    Evaluation {
        rlhf_candidate: is_rlhf_candidate(
            word_count,
            scores.reality_index.score,
            scores.trust_protocol.status,
            scores.ethical_alignment.score,
            scores.canvas_parity.score,
        ),
        confidence: round3(unrounded),
        human_review_required: unrounded < HUMAN_REVIEW_CONFIDENCE_THRESHOLD,
    }
}

/// All five gates must hold; every bound is inclusive.
pub fn is_rlhf_candidate(
    word_count: usize,
    reality_index: f64,
    trust: TrustStatus,
    ethical_score: f64,
    canvas_parity: u32,
) -> bool {
    (MIN_WORD_COUNT..=RLHF_MAX_WORD_COUNT).contains(&word_count)
        && reality_index >= RLHF_MIN_REALITY_INDEX
        && trust == TrustStatus::Pass
        && ethical_score >= RLHF_MIN_ETHICAL_SCORE
        && canvas_parity >= RLHF_MIN_CANVAS_PARITY
}

/// Mean of the normalized scores plus a consistency bonus, in `[0.65, 0.95]`.
///
/// The bonus is `max(0, 0.15 - variance)` (population variance), so agreeing
/// dimensions push confidence up. Rounded to three decimals; the review flag in
/// [`evaluate`] compares the unrounded value.
pub fn confidence(scores: &DimensionScores) -> f64 {
    round3(unrounded_confidence(scores))
}

fn unrounded_confidence(scores: &DimensionScores) -> f64 {
    let normalized = normalized_scores(scores);
    let n = normalized.len() as f64;
    let mean = normalized.iter().sum::<f64>() / n;
    let variance = normalized.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let bonus = (CONSISTENCY_BONUS_CEILING - variance).max(0.0);

    let raw = mean + bonus;
    if raw.is_nan() {
        return MIN_CONFIDENCE;
    }
    raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn normalized_scores(scores: &DimensionScores) -> [f64; 5] {
    [
        scores.reality_index.score / 10.0,
        f64::from(scores.trust_protocol.score) / 100.0,
        (scores.ethical_alignment.score - 1.0) / 4.0,
        f64::from(scores.resonance_quality.creativity_score) / 100.0,
        f64::from(scores.canvas_parity.score) / 100.0,
    ]
}
