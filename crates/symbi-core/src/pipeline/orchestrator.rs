use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::canonical::{CanonicalContent, canonicalize, count_words, extract_text};
use crate::constants::{MAX_DRIFT_WINDOW, MIN_WORD_COUNT};
use crate::drift::EmergenceSummary;
use crate::evaluation::evaluate;
use crate::metrics::{Counter, MetricsSink, NoopMetrics};
use crate::record::{AssessmentRecord, ErrorReason, RecordStatus};
use crate::scoring::{
    DeterministicScorer, DimensionScores, DimensionScoring, ScoringError, ScoringInput, TrustStatus,
};
use crate::store::{AssessmentRepository, KvStore, StoreResult};

use super::config::PipelineConfig;
use super::error::{PipelineError, PipelineResult};
use super::types::{
    ArtifactSubmission, DuplicateGroup, DuplicateMember, DuplicateReport, RequestContext,
    ScorePreview, ScoringTask, SubmissionReceipt, SubmitOutcome, WordCountReport,
};

const PREVIEW_CHARS: usize = 200;

/// Intake, dedup, background scoring and read paths over one record store.
///
/// Clones share the store, scorer, metrics sink and in-flight task registry.
#[derive(Clone)]
pub struct AssessmentPipeline<S> {
    repo: AssessmentRepository<S>,
    scorer: Arc<dyn DimensionScoring>,
    metrics: Arc<dyn MetricsSink>,
    config: PipelineConfig,
    in_flight: Arc<Mutex<HashMap<String, CancellationToken>>>,
}

impl<S> std::fmt::Debug for AssessmentPipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentPipeline")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight.lock().len())
            .finish_non_exhaustive()
    }
}

/// Outcome of one background scoring run.
enum ScoringOutcome {
    Scored(DimensionScores),
    Failed(ErrorReason),
    Cancelled,
}

impl<S: KvStore + Clone> AssessmentPipeline<S> {
    /// Creates a pipeline with the deterministic scorer and no metrics.
    pub fn new(store: S, config: PipelineConfig) -> Self {
        Self {
            repo: AssessmentRepository::new(store),
            scorer: Arc::new(DeterministicScorer::new()),
            metrics: Arc::new(NoopMetrics),
            config,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn DimensionScoring>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn repository(&self) -> &AssessmentRepository<S> {
        &self.repo
    }

    /// Number of records currently being scored.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Accepts an artifact.
    ///
    /// Returns once the record is persisted as `auto_disregarded`, as a `complete`
    /// duplicate, or as a `processing` placeholder. In the last case scoring continues on a
    /// detached task exposed through [`SubmitOutcome::task`].
    pub async fn submit(
        &self,
        submission: ArtifactSubmission,
        ctx: &RequestContext,
    ) -> PipelineResult<SubmitOutcome> {
        let filename = submission.filename.trim();
        if filename.is_empty() {
            return Err(PipelineError::validation("filename is required"));
        }
        if submission.content.trim().is_empty() {
            return Err(PipelineError::validation("content is required"));
        }

        let tenant = ctx.tenant_id.as_str();
        self.metrics.increment(tenant, Counter::Submissions);

        let canonical = canonicalize(&submission.content);

        if canonical.word_count < MIN_WORD_COUNT {
            let record = AssessmentRecord::disregarded(filename, &canonical, Some(tenant));
            self.repo.put(&record).await?;
            self.metrics.increment(tenant, Counter::AutoDisregarded);
            info!(
                id = %record.id,
                content_hash = %canonical.content_hash,
                word_count = canonical.word_count,
                tenant_id = tenant,
                status = %record.status,
                "Submission below word-count floor"
            );
            return Ok(SubmitOutcome {
                receipt: receipt(&record),
                task: None,
            });
        }

        if let Some(original) = self.repo.find_complete_by_hash(&canonical.content_hash).await? {
            let record = AssessmentRecord::duplicate(filename, &canonical, &original, Some(tenant));
            self.repo.put(&record).await?;
            self.metrics.increment(tenant, Counter::Duplicates);
            info!(
                id = %record.id,
                duplicate_of = %original.id,
                content_hash = %canonical.content_hash,
                tenant_id = tenant,
                "Duplicate content, reusing assessment"
            );
            return Ok(SubmitOutcome {
                receipt: receipt(&record),
                task: None,
            });
        }

        let record = AssessmentRecord::processing(filename, &canonical, Some(tenant));
        self.repo.put(&record).await?;

        let token = CancellationToken::new();
        self.in_flight
            .lock()
            .insert(record.id.clone(), token.clone());

        info!(
            id = %record.id,
            content_hash = %canonical.content_hash,
            word_count = canonical.word_count,
            tenant_id = tenant,
            "Scoring started"
        );

        let out_receipt = receipt(&record);
        let input = scoring_input(canonical);
        let pipeline = self.clone();
        let task_token = token.clone();
        let tenant = tenant.to_string();
        let handle = tokio::spawn(async move {
            pipeline.run_scoring(record, input, task_token, tenant).await;
        });

        Ok(SubmitOutcome {
            receipt: out_receipt,
            task: Some(ScoringTask::new(handle, token)),
        })
    }

    async fn run_scoring(
        &self,
        record: AssessmentRecord,
        input: ScoringInput,
        token: CancellationToken,
        tenant: String,
    ) {
        let id = record.id.clone();
        let outcome = self.score_with_timeout(input, &token).await;

        let written = match outcome {
            ScoringOutcome::Scored(scores) => {
                match self.complete(record.clone(), scores, &token, &tenant).await {
                    Ok(written) => Ok(written),
                    Err(e) => {
                        error!(id = %id, error = %e, "Completing assessment failed");
                        let written = self
                            .write_if_processing(&record.failed(ErrorReason::ProcessingError), &token)
                            .await;
                        if matches!(written, Ok(true)) {
                            self.metrics.increment(&tenant, Counter::Errors);
                        }
                        written
                    }
                }
            }
            ScoringOutcome::Failed(reason) => {
                let written = self
                    .write_if_processing(&record.failed(reason), &token)
                    .await;
                if matches!(written, Ok(true)) {
                    self.metrics.increment(&tenant, Counter::Errors);
                }
                written
            }
            ScoringOutcome::Cancelled => {
                info!(id = %id, "Scoring cancelled, result discarded");
                Ok(false)
            }
        };

        if let Err(e) = written {
            error!(id = %id, error = %e, "Failed to persist scoring result");
            self.metrics.increment(&tenant, Counter::Errors);
        }

        self.in_flight.lock().remove(&id);
    }

    async fn score_with_timeout(
        &self,
        input: ScoringInput,
        token: &CancellationToken,
    ) -> ScoringOutcome {
        let scorer = Arc::clone(&self.scorer);
        let blocking_token = token.clone();
        let fingerprint = input.fingerprint.clone();
        let work = tokio::task::spawn_blocking(move || scorer.score(&input, &blocking_token));

        tokio::select! {
            _ = token.cancelled() => ScoringOutcome::Cancelled,
            result = tokio::time::timeout(self.config.processing_timeout, work) => match result {
                Err(_) => {
                    token.cancel();
                    warn!(
                        content_hash = %fingerprint,
                        timeout_ms = self.config.processing_timeout.as_millis() as u64,
                        "Scoring timed out"
                    );
                    ScoringOutcome::Failed(ErrorReason::ProcessingTimeout)
                }
                Ok(Err(join_err)) => {
                    error!(content_hash = %fingerprint, error = %join_err, "Scoring task panicked");
                    ScoringOutcome::Failed(ErrorReason::ProcessingError)
                }
                Ok(Ok(Err(ScoringError::Cancelled))) => ScoringOutcome::Cancelled,
                Ok(Ok(Err(e))) => {
                    warn!(content_hash = %fingerprint, error = %e, "Scoring failed");
                    ScoringOutcome::Failed(ErrorReason::ProcessingError)
                }
                Ok(Ok(Ok(scores))) => ScoringOutcome::Scored(scores),
            },
        }
    }

    async fn complete(
        &self,
        record: AssessmentRecord,
        scores: DimensionScores,
        token: &CancellationToken,
        tenant: &str,
    ) -> StoreResult<bool> {
        let evaluation = evaluate(record.word_count, &scores);

        let history = self.repo.list_complete().await?;
        let keep = self.config.drift_window.saturating_sub(1);
        let mut window: Vec<_> = history
            .iter()
            .filter(|r| r.id != record.id)
            .filter_map(window_point)
            .collect();
        let excess = window.len().saturating_sub(keep);
        window.drain(..excess);
        window.push((
            scores.trust_protocol.status,
            scores.reality_index.score,
        ));

        let emergence = EmergenceSummary::from_window(&window, &self.config.drift);

        self.metrics.record_scores(tenant, &scores);
        self.metrics
            .record_drift(tenant, &emergence.drift, emergence.critical_rate);
        if emergence.drift.drifting {
            self.metrics.increment(tenant, Counter::DriftEvents);
            warn!(
                id = %record.id,
                reality = emergence.drift.last,
                ewma = emergence.drift.ewma,
                threshold = emergence.drift.threshold,
                "Reality Index drift detected, human review forced"
            );
        }

        let completed = record.completed(scores, evaluation, emergence);
        let written = self.write_if_processing(&completed, token).await?;
        if written {
            self.metrics.increment(tenant, Counter::Completed);
            info!(
                id = %completed.id,
                status = %completed.status,
                confidence = evaluation.confidence,
                rlhf_candidate = completed.metadata.rlhf_candidate,
                human_review_required = completed.metadata.human_review_required,
                "Assessment complete"
            );
        }
        Ok(written)
    }

    /// Persists `record` only if the stored copy is still `processing` and the task was not
    /// cancelled.
    async fn write_if_processing(
        &self,
        record: &AssessmentRecord,
        token: &CancellationToken,
    ) -> StoreResult<bool> {
        if token.is_cancelled() && record.status == RecordStatus::Complete {
            warn!(id = %record.id, "Late result after cancellation discarded");
            return Ok(false);
        }

        match self.repo.get(&record.id).await? {
            Some(current) if current.status == RecordStatus::Processing => {
                self.repo.put(record).await?;
                Ok(true)
            }
            Some(current) => {
                warn!(id = %record.id, status = %current.status, "Record already settled, write discarded");
                Ok(false)
            }
            None => {
                warn!(id = %record.id, "Record deleted during scoring, write discarded");
                Ok(false)
            }
        }
    }

    pub async fn get(&self, id: &str) -> PipelineResult<AssessmentRecord> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| PipelineError::NotFound { id: id.to_string() })
    }

    /// All records, newest first.
    pub async fn list(&self) -> PipelineResult<Vec<AssessmentRecord>> {
        let mut records = self.repo.list().await?;
        records.sort_by(|a, b| {
            b.upload_timestamp
                .cmp(&a.upload_timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    /// Deletes a record, cancelling its scoring task if one is running.
    pub async fn delete(&self, id: &str) -> PipelineResult<()> {
        if let Some(token) = self.in_flight.lock().get(id) {
            token.cancel();
            debug!(id, "Cancelled in-flight scoring");
        }

        if self.repo.delete(id).await? {
            info!(id, "Assessment deleted");
            Ok(())
        } else {
            Err(PipelineError::NotFound { id: id.to_string() })
        }
    }

    /// Complete records grouped by fingerprint, for groups with more than one member.
    pub async fn duplicate_report(&self) -> PipelineResult<DuplicateReport> {
        let mut buckets: BTreeMap<String, Vec<AssessmentRecord>> = BTreeMap::new();
        for record in self.repo.list_complete().await? {
            buckets
                .entry(record.metadata.content_hash.clone())
                .or_default()
                .push(record);
        }

        let groups: Vec<DuplicateGroup> = buckets
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(content_hash, members)| {
                let consistent = members
                    .windows(2)
                    .all(|pair| pair[0].assessment == pair[1].assessment);
                DuplicateGroup {
                    content_hash,
                    count: members.len(),
                    consistent,
                    records: members
                        .into_iter()
                        .map(|r| DuplicateMember {
                            id: r.id,
                            filename: r.filename,
                            upload_timestamp: r.upload_timestamp,
                            duplicate_of: r.metadata.duplicate_of,
                        })
                        .collect(),
                }
            })
            .collect();

        let inconsistent_groups = groups.iter().filter(|g| !g.consistent).count();
        if inconsistent_groups > 0 {
            warn!(inconsistent_groups, "Duplicate groups with diverging assessments");
        }

        Ok(DuplicateReport {
            total_groups: groups.len(),
            inconsistent_groups,
            groups,
        })
    }

    /// Drift summary over the most recent `window` complete records.
    ///
    /// `None` uses the configured window. Larger values are capped.
    pub async fn emergence(&self, window: Option<usize>) -> PipelineResult<EmergenceSummary> {
        let window = window.unwrap_or(self.config.drift_window);
        if window == 0 {
            return Err(PipelineError::validation("window must be at least 1"));
        }
        let window = window.min(MAX_DRIFT_WINDOW);

        let points: Vec<_> = self
            .repo
            .list_complete()
            .await?
            .iter()
            .filter_map(window_point)
            .collect();
        let start = points.len().saturating_sub(window);

        Ok(EmergenceSummary::from_window(&points[start..], &self.config.drift))
    }

    /// Scores content without persisting it.
    pub async fn preview(&self, content: &str) -> PipelineResult<ScorePreview> {
        if content.trim().is_empty() {
            return Err(PipelineError::validation("content is required"));
        }

        let canonical = canonicalize(content);
        let word_count = canonical.word_count;
        let content_hash = canonical.content_hash.clone();
        let input = scoring_input(canonical);

        let scorer = Arc::clone(&self.scorer);
        let token = CancellationToken::new();
        let blocking_token = token.clone();
        let work = tokio::task::spawn_blocking(move || scorer.score(&input, &blocking_token));

        let scores = match tokio::time::timeout(self.config.processing_timeout, work).await {
            Err(_) => {
                token.cancel();
                return Err(PipelineError::Timeout {
                    timeout_ms: self.config.processing_timeout.as_millis() as u64,
                });
            }
            Ok(joined) => joined.map_err(|e| PipelineError::Internal {
                message: e.to_string(),
            })??,
        };

        let evaluation = evaluate(word_count, &scores);
        Ok(ScorePreview {
            content_hash,
            word_count,
            assessment: scores,
            confidence_score: evaluation.confidence,
            rlhf_candidate: evaluation.rlhf_candidate,
            human_review_required: evaluation.human_review_required,
        })
    }
}

/// Shows what the canonicalizer keeps and counts.
pub fn word_count_report(content: &str) -> WordCountReport {
    let extracted = extract_text(content);
    WordCountReport {
        word_count: count_words(&extracted),
        raw_length: content.chars().count(),
        extracted_length: extracted.chars().count(),
        preview: extracted.chars().take(PREVIEW_CHARS).collect(),
    }
}

fn receipt(record: &AssessmentRecord) -> SubmissionReceipt {
    SubmissionReceipt {
        assessment_id: record.id.clone(),
        status: record.status,
        content_hash: record.metadata.content_hash.clone(),
        word_count: record.word_count,
    }
}

fn scoring_input(canonical: CanonicalContent) -> ScoringInput {
    ScoringInput {
        text: canonical.scoring_text,
        word_count: canonical.word_count,
        fingerprint: canonical.content_hash,
    }
}

fn window_point(record: &AssessmentRecord) -> Option<(TrustStatus, f64)> {
    record
        .assessment
        .as_ref()
        .map(|a| (a.trust_protocol.status, a.reality_index.score))
}
