use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::hashing::seeded_draw;

use super::error::ScoringError;
use super::keywords::{self, Keywords, TokenizedText};
use super::types::{
    CanvasParity, DimensionScores, EthicalAlignment, RealityIndex, ResonanceLevel,
    ResonanceQuality, ScoringInput, TrustProtocol, TrustStatus,
};

/// Produces the five dimension scores for an artifact.
///
/// Implementations run on a blocking thread and should return
/// [`ScoringError::Cancelled`] promptly once `cancel` fires.
pub trait DimensionScoring: Send + Sync + 'static {
    fn score(
        &self,
        input: &ScoringInput,
        cancel: &CancellationToken,
    ) -> Result<DimensionScores, ScoringError>;
}

/// Linear density curve: `base + min(density * scale, cap) + (draw - 0.5) * jitter`,
/// clamped to `[min, max]`.
#[derive(Debug, Clone, Copy)]
struct Curve {
    base: f64,
    scale: f64,
    cap: f64,
    jitter: f64,
    min: f64,
    max: f64,
}

impl Curve {
    fn apply(&self, density: f64, draw: f64) -> f64 {
        let value = self.base + (density * self.scale).min(self.cap) + (draw - 0.5) * self.jitter;
        value.clamp(self.min, self.max)
    }
}

const REALITY_CURVE: Curve = Curve {
    base: 5.0,
    scale: 1.5,
    cap: 4.0,
    jitter: 1.0,
    min: 0.0,
    max: 10.0,
};

const ETHICAL_CURVE: Curve = Curve {
    base: 2.5,
    scale: 0.8,
    cap: 2.0,
    jitter: 0.5,
    min: 1.0,
    max: 5.0,
};

const CREATIVITY_CURVE: Curve = Curve {
    base: 60.0,
    scale: 8.0,
    cap: 35.0,
    jitter: 10.0,
    min: 0.0,
    max: 100.0,
};

const CANVAS_CURVE: Curve = Curve {
    base: 60.0,
    scale: 6.0,
    cap: 35.0,
    jitter: 8.0,
    min: 0.0,
    max: 100.0,
};

const TRUST_KEYWORD_WEIGHT: f64 = 2.0;
const TRUST_KEYWORD_CAP: f64 = 15.0;
const TRUST_JITTER: f64 = 6.0;

// Draw indices. Every sub-score owns one index so adding a keyword never shifts another's draw.
const REALITY_DRAWS: [u32; 4] = [0, 1, 2, 3];
const TRUST_DRAW: u32 = 4;
const ETHICAL_DRAWS: [u32; 4] = [5, 6, 7, 8];
const CREATIVITY_DRAW: u32 = 9;
const CANVAS_DRAWS: [u32; 4] = [10, 11, 12, 13];

/// Keyword-density scorer seeded by the content fingerprint.
///
/// Identical `(text, word_count, fingerprint)` inputs always produce identical scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicScorer;

impl DeterministicScorer {
    pub fn new() -> Self {
        Self
    }
}

impl DimensionScoring for DeterministicScorer {
    fn score(
        &self,
        input: &ScoringInput,
        cancel: &CancellationToken,
    ) -> Result<DimensionScores, ScoringError> {
        if input.fingerprint.is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "empty fingerprint".to_string(),
            });
        }

        let tokens = TokenizedText::new(&input.text);
        let ctx = ScoreContext {
            tokens: &tokens,
            word_count: input.word_count,
            fingerprint: &input.fingerprint,
        };

        check_cancelled(cancel)?;
        let reality_index = ctx.reality();
        check_cancelled(cancel)?;
        let trust_protocol = ctx.trust();
        check_cancelled(cancel)?;
        let ethical_alignment = ctx.ethical();
        check_cancelled(cancel)?;
        let resonance_quality = ctx.resonance();
        check_cancelled(cancel)?;
        let canvas_parity = ctx.canvas();

        debug!(
            fingerprint = %input.fingerprint,
            word_count = input.word_count,
            tokens = tokens.len(),
            reality = reality_index.score,
            trust = %trust_protocol.status,
            "Dimensions scored"
        );

        Ok(DimensionScores {
            reality_index,
            trust_protocol,
            ethical_alignment,
            resonance_quality,
            canvas_parity,
        })
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), ScoringError> {
    if cancel.is_cancelled() {
        Err(ScoringError::Cancelled)
    } else {
        Ok(())
    }
}

struct ScoreContext<'a> {
    tokens: &'a TokenizedText<'a>,
    word_count: usize,
    fingerprint: &'a str,
}

impl ScoreContext<'_> {
    fn draw(&self, index: u32) -> f64 {
        seeded_draw(self.fingerprint, index)
    }

    fn curve(&self, curve: Curve, set: Keywords, draw_index: u32) -> f64 {
        curve.apply(
            self.tokens.density(set, self.word_count),
            self.draw(draw_index),
        )
    }

    fn reality(&self) -> RealityIndex {
        let [mission, coherence, technical, authenticity] = [
            (keywords::MISSION, REALITY_DRAWS[0]),
            (keywords::COHERENCE, REALITY_DRAWS[1]),
            (keywords::TECHNICAL, REALITY_DRAWS[2]),
            (keywords::AUTHENTICITY, REALITY_DRAWS[3]),
        ]
        .map(|(set, idx)| round1(self.curve(REALITY_CURVE, set, idx)));

        RealityIndex {
            score: round1((mission + coherence + technical + authenticity) / 4.0),
            mission_alignment: mission,
            contextual_coherence: coherence,
            technical_accuracy: technical,
            authenticity,
        }
    }

    fn trust(&self) -> TrustProtocol {
        let verification = self.tokens.count(keywords::VERIFICATION);
        let boundary = self.tokens.count(keywords::BOUNDARY);
        let security = self.tokens.count(keywords::SECURITY);
        let status = TrustStatus::from_counts(verification, boundary, security);

        let base = match status {
            TrustStatus::Pass => 80.0,
            TrustStatus::Partial => 55.0,
            TrustStatus::Fail => 25.0,
        };
        let total = f64::from(verification.saturating_add(boundary).saturating_add(security));
        let raw = base
            + (total * TRUST_KEYWORD_WEIGHT).min(TRUST_KEYWORD_CAP)
            + (self.draw(TRUST_DRAW) - 0.5) * TRUST_JITTER;

        TrustProtocol {
            status,
            score: to_percent(raw),
            verification_count: verification,
            boundary_count: boundary,
            security_count: security,
        }
    }

    fn ethical(&self) -> EthicalAlignment {
        let [limitations, stakeholder, reasoning, boundary] = [
            (keywords::LIMITATIONS, ETHICAL_DRAWS[0]),
            (keywords::STAKEHOLDER, ETHICAL_DRAWS[1]),
            (keywords::ETHICAL_REASONING, ETHICAL_DRAWS[2]),
            (keywords::BOUNDARY_MAINTENANCE, ETHICAL_DRAWS[3]),
        ]
        .map(|(set, idx)| round1(self.curve(ETHICAL_CURVE, set, idx)));

        EthicalAlignment {
            score: round1((limitations + stakeholder + reasoning + boundary) / 4.0),
            limitations_acknowledgment: limitations,
            stakeholder_awareness: stakeholder,
            ethical_reasoning: reasoning,
            boundary_maintenance: boundary,
        }
    }

    fn resonance(&self) -> ResonanceQuality {
        let creativity = to_percent(self.curve(
            CREATIVITY_CURVE,
            keywords::CREATIVITY,
            CREATIVITY_DRAW,
        ));
        let synthesis = self.tokens.count(keywords::SYNTHESIS);

        ResonanceQuality {
            level: ResonanceLevel::from_scores(creativity, synthesis),
            creativity_score: creativity,
            synthesis_count: synthesis,
        }
    }

    fn canvas(&self) -> CanvasParity {
        let [agency, contribution, transparency, collaboration] = [
            (keywords::HUMAN_AGENCY, CANVAS_DRAWS[0]),
            (keywords::AI_CONTRIBUTION, CANVAS_DRAWS[1]),
            (keywords::TRANSPARENCY, CANVAS_DRAWS[2]),
            (keywords::COLLABORATION, CANVAS_DRAWS[3]),
        ]
        .map(|(set, idx)| to_percent(self.curve(CANVAS_CURVE, set, idx)));

        let mean = f64::from(agency + contribution + transparency + collaboration) / 4.0;

        CanvasParity {
            score: to_percent(mean),
            human_agency: agency,
            ai_contribution: contribution,
            transparency,
            collaboration_quality: collaboration,
        }
    }
}

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn to_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}
