//! Injected metrics sink.
//!
//! The pipeline reports through [`MetricsSink`]; nothing is registered globally. Values are
//! keyed by `(tenant, name)`.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;

use crate::drift::DriftReport;
use crate::scoring::{DimensionScores, TrustStatus};

/// Counter names reported by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    Submissions,
    AutoDisregarded,
    Duplicates,
    Completed,
    Errors,
    DriftEvents,
}

impl Counter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::Submissions => "submissions",
            Counter::AutoDisregarded => "auto_disregarded",
            Counter::Duplicates => "duplicates",
            Counter::Completed => "completed",
            Counter::Errors => "errors",
            Counter::DriftEvents => "drift_events",
        }
    }
}

pub trait MetricsSink: Send + Sync {
    /// Gauges for one completed assessment.
    fn record_scores(&self, tenant: &str, scores: &DimensionScores);

    /// Gauges for the drift window evaluated alongside an assessment.
    fn record_drift(&self, tenant: &str, report: &DriftReport, critical_rate: f64);

    fn increment(&self, tenant: &str, counter: Counter);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record_scores(&self, _tenant: &str, _scores: &DimensionScores) {}

    fn record_drift(&self, _tenant: &str, _report: &DriftReport, _critical_rate: f64) {}

    fn increment(&self, _tenant: &str, _counter: Counter) {}
}

/// Point-in-time copy of [`InMemoryMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// tenant -> counter -> count
    pub counters: BTreeMap<String, BTreeMap<String, u64>>,
    /// tenant -> gauge -> latest value
    pub gauges: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MetricsSnapshot {
    pub fn counter(&self, tenant: &str, counter: Counter) -> u64 {
        self.counters
            .get(tenant)
            .and_then(|c| c.get(counter.as_str()))
            .copied()
            .unwrap_or(0)
    }

    pub fn gauge(&self, tenant: &str, name: &str) -> Option<f64> {
        self.gauges.get(tenant).and_then(|g| g.get(name)).copied()
    }
}

/// Keeps counters and latest gauge values in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    inner: Mutex<MetricsSnapshot>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().clone()
    }

    fn set_gauges(&self, tenant: &str, values: &[(&str, f64)]) {
        let mut inner = self.inner.lock();
        let gauges = inner.gauges.entry(tenant.to_string()).or_default();
        for (name, value) in values {
            gauges.insert((*name).to_string(), *value);
        }
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record_scores(&self, tenant: &str, scores: &DimensionScores) {
        let trust_pass = if scores.trust_protocol.status == TrustStatus::Pass {
            1.0
        } else {
            0.0
        };
        self.set_gauges(
            tenant,
            &[
                ("reality_index", scores.reality_index.score),
                ("trust_score", f64::from(scores.trust_protocol.score)),
                ("trust_pass", trust_pass),
                ("ethical_alignment", scores.ethical_alignment.score),
                (
                    "creativity_score",
                    f64::from(scores.resonance_quality.creativity_score),
                ),
                ("canvas_parity", f64::from(scores.canvas_parity.score)),
            ],
        );
    }

    fn record_drift(&self, tenant: &str, report: &DriftReport, critical_rate: f64) {
        self.set_gauges(
            tenant,
            &[
                ("drift_ewma", report.ewma),
                ("drift_deviation", report.deviation),
                ("drift_threshold", report.threshold),
                ("critical_rate", critical_rate),
            ],
        );
    }

    fn increment(&self, tenant: &str, counter: Counter) {
        let mut inner = self.inner.lock();
        *inner
            .counters
            .entry(tenant.to_string())
            .or_default()
            .entry(counter.as_str().to_string())
            .or_default() += 1;
    }
}
