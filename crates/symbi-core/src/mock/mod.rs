//! Test doubles for the scorer and the key/value store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::scoring::{
    CanvasParity, DeterministicScorer, DimensionScores, DimensionScoring, EthicalAlignment,
    RealityIndex, ResonanceLevel, ResonanceQuality, ScoringError, ScoringInput, TrustProtocol,
    TrustStatus,
};
use crate::store::{KvStore, MemoryStore, StoreError, StoreResult};

const SLEEP_SLICE: Duration = Duration::from_millis(5);

/// Strong scores with the given Reality Index. For a Reality Index of 5.0 or more the
/// confidence clamps to 0.95, so human review is only forced by drift.
pub fn sample_scores(reality: f64) -> DimensionScores {
    DimensionScores {
        reality_index: RealityIndex {
            score: reality,
            mission_alignment: reality,
            contextual_coherence: reality,
            technical_accuracy: reality,
            authenticity: reality,
        },
        trust_protocol: TrustProtocol {
            status: TrustStatus::Pass,
            score: 95,
            verification_count: 3,
            boundary_count: 3,
            security_count: 2,
        },
        ethical_alignment: EthicalAlignment {
            score: 4.6,
            limitations_acknowledgment: 4.6,
            stakeholder_awareness: 4.6,
            ethical_reasoning: 4.6,
            boundary_maintenance: 4.6,
        },
        resonance_quality: ResonanceQuality {
            level: ResonanceLevel::Advanced,
            creativity_score: 90,
            synthesis_count: 3,
        },
        canvas_parity: CanvasParity {
            score: 90,
            human_agency: 90,
            ai_contribution: 90,
            transparency: 90,
            collaboration_quality: 90,
        },
    }
}

/// Sleeps before delegating to [`DeterministicScorer`], honouring cancellation.
#[derive(Debug)]
pub struct SlowScorer {
    delay: Duration,
    calls: AtomicUsize,
}

impl SlowScorer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DimensionScoring for SlowScorer {
    fn score(
        &self,
        input: &ScoringInput,
        cancel: &CancellationToken,
    ) -> Result<DimensionScores, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let deadline = Instant::now() + self.delay;
        while Instant::now() < deadline {
            if cancel.is_cancelled() {
                return Err(ScoringError::Cancelled);
            }
            std::thread::sleep(SLEEP_SLICE);
        }
        DeterministicScorer::new().score(input, cancel)
    }
}

/// Always fails.
#[derive(Debug, Default)]
pub struct FailingScorer;

impl DimensionScoring for FailingScorer {
    fn score(
        &self,
        _input: &ScoringInput,
        _cancel: &CancellationToken,
    ) -> Result<DimensionScores, ScoringError> {
        Err(ScoringError::ComputationFailed {
            reason: "mock failure".to_string(),
        })
    }
}

/// Returns a queue of fixed scores, repeating the last one; counts calls.
#[derive(Debug)]
pub struct FixedScorer {
    scores: Vec<DimensionScores>,
    calls: AtomicUsize,
}

impl FixedScorer {
    /// # Panics
    /// Panics if `scores` is empty.
    pub fn new(scores: Vec<DimensionScores>) -> Self {
        assert!(!scores.is_empty(), "FixedScorer needs at least one result");
        Self {
            scores,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DimensionScoring for FixedScorer {
    fn score(
        &self,
        _input: &ScoringInput,
        _cancel: &CancellationToken,
    ) -> Result<DimensionScores, ScoringError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = call.min(self.scores.len() - 1);
        Ok(self.scores[idx].clone())
    }
}

/// Store whose every operation reports the backend as unavailable.
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore;

impl UnavailableStore {
    fn error() -> StoreError {
        StoreError::Unavailable {
            message: "mock store offline".to_string(),
        }
    }
}

#[async_trait]
impl KvStore for UnavailableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Err(Self::error())
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> StoreResult<()> {
        Err(Self::error())
    }

    async fn del(&self, _key: &str) -> StoreResult<bool> {
        Err(Self::error())
    }

    async fn get_by_prefix(&self, _prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        Err(Self::error())
    }
}

/// Memory-backed store whose prefix scans fail after the first `healthy_scans` calls.
///
/// Point reads and writes keep working.
#[derive(Debug, Clone)]
pub struct FlakyScanStore {
    inner: MemoryStore,
    scans: Arc<AtomicUsize>,
    healthy_scans: usize,
}

impl FlakyScanStore {
    pub fn new(healthy_scans: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            scans: Arc::new(AtomicUsize::new(0)),
            healthy_scans,
        }
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KvStore for FlakyScanStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.inner.set(key, value).await
    }

    async fn del(&self, key: &str) -> StoreResult<bool> {
        self.inner.del(key).await
    }

    async fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        if self.scans.fetch_add(1, Ordering::SeqCst) >= self.healthy_scans {
            return Err(StoreError::Unavailable {
                message: "mock scan offline".to_string(),
            });
        }
        self.inner.get_by_prefix(prefix).await
    }
}
