use serde::{Deserialize, Serialize};

/// Trust Protocol tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrustStatus {
    Pass,
    Partial,
    Fail,
}

impl TrustStatus {
    /// Applies the tiering rule to the three keyword counts.
    ///
    /// PASS needs a total of at least 6 with at least 2 verification and 2 boundary
    /// mentions. PARTIAL needs a total of at least 3 with any verification or boundary
    /// mention. Everything else is FAIL.
    pub fn from_counts(verification: u32, boundary: u32, security: u32) -> Self {
        let total = verification + boundary + security;
        if total >= 6 && verification >= 2 && boundary >= 2 {
            TrustStatus::Pass
        } else if total >= 3 && (verification >= 1 || boundary >= 1) {
            TrustStatus::Partial
        } else {
            TrustStatus::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustStatus::Pass => "PASS",
            TrustStatus::Partial => "PARTIAL",
            TrustStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for TrustStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resonance Quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResonanceLevel {
    Strong,
    Advanced,
    Breakthrough,
}

impl ResonanceLevel {
    /// Applies the tiering rule to the creativity score and synthesis count.
    pub fn from_scores(creativity: u32, synthesis: u32) -> Self {
        if creativity >= 90 && synthesis >= 4 {
            ResonanceLevel::Breakthrough
        } else if (creativity >= 80 && synthesis >= 2) || (creativity >= 70 && synthesis >= 1) {
            ResonanceLevel::Advanced
        } else {
            ResonanceLevel::Strong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResonanceLevel::Strong => "STRONG",
            ResonanceLevel::Advanced => "ADVANCED",
            ResonanceLevel::Breakthrough => "BREAKTHROUGH",
        }
    }
}

impl std::fmt::Display for ResonanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reality Index (0.0–10.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealityIndex {
    pub score: f64,
    pub mission_alignment: f64,
    pub contextual_coherence: f64,
    pub technical_accuracy: f64,
    pub authenticity: f64,
}

/// Trust Protocol tier plus a 0–100 score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustProtocol {
    pub status: TrustStatus,
    pub score: u32,
    pub verification_count: u32,
    pub boundary_count: u32,
    pub security_count: u32,
}

/// Ethical Alignment (1.0–5.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicalAlignment {
    pub score: f64,
    pub limitations_acknowledgment: f64,
    pub stakeholder_awareness: f64,
    pub ethical_reasoning: f64,
    pub boundary_maintenance: f64,
}

/// Resonance Quality tier plus a 0–100 creativity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResonanceQuality {
    pub level: ResonanceLevel,
    pub creativity_score: u32,
    pub synthesis_count: u32,
}

/// Canvas Parity (0–100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasParity {
    pub score: u32,
    pub human_agency: u32,
    pub ai_contribution: u32,
    pub transparency: u32,
    pub collaboration_quality: u32,
}

/// The five dimension results of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub reality_index: RealityIndex,
    pub trust_protocol: TrustProtocol,
    pub ethical_alignment: EthicalAlignment,
    pub resonance_quality: ResonanceQuality,
    pub canvas_parity: CanvasParity,
}

/// Owned scorer input. Owned so it can move into a blocking task.
#[derive(Debug, Clone)]
pub struct ScoringInput {
    /// Extracted, lowercased text.
    pub text: String,
    /// Filtered word count of `text`.
    pub word_count: usize,
    /// Content fingerprint used to seed the draws.
    pub fingerprint: String,
}
