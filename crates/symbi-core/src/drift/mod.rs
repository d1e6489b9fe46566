//! EWMA drift detection and critical-rate tracking over a window of Reality Index scores.
//!
//! The newest score is compared against an exponentially weighted moving average of the
//! preceding scores; it drifts when the deviation exceeds `L x sigma` of that history.


use serde::{Deserialize, Serialize};

use crate::constants::{
    CRITICAL_REALITY_THRESHOLD, DEFAULT_DRIFT_ALPHA, DEFAULT_DRIFT_CONTROL_LIMIT,
    DRIFT_MIN_POINTS, DRIFT_STD_FLOOR,
};
use crate::scoring::TrustStatus;

/// Drift detector parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftConfig {
    /// EWMA smoothing factor in `(0, 1]`.
    pub alpha: f64,
    /// Control-limit multiplier `L`.
    pub control_limit: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_DRIFT_ALPHA,
            control_limit: DEFAULT_DRIFT_CONTROL_LIMIT,
        }
    }
}

/// Result of one drift evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub drifting: bool,
    pub mean: f64,
    pub std: f64,
    pub ewma: f64,
    pub threshold: f64,
    pub deviation: f64,
    pub last: f64,
    pub sample_size: usize,
}

/// Evaluates drift of the last value against the rest.
///
/// `values` is chronological with the newest score last. With fewer than three points
/// the report is all zeros and `drifting` is `false`.
pub fn detect_drift(values: &[f64], config: &DriftConfig) -> DriftReport {
    let Some((&last, history)) = values.split_last() else {
        return DriftReport::default();
    };
    if values.len() < DRIFT_MIN_POINTS {
        return DriftReport {
            sample_size: values.len(),
            ..DriftReport::default()
        };
    }

    let n = history.len() as f64;
    let mean = history.iter().sum::<f64>() / n;
    let sum_sq = history.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let std = (sum_sq / (n - 1.0).max(1.0)).sqrt().max(DRIFT_STD_FLOOR);

    let ewma = history
        .iter()
        .skip(1)
        .fold(history[0], |s, &v| config.alpha * v + (1.0 - config.alpha) * s);

    let threshold = std * config.control_limit;
    let deviation = (last - ewma).abs();

    DriftReport {
        drifting: deviation > threshold,
        mean,
        std,
        ewma,
        threshold,
        deviation,
        last,
        sample_size: values.len(),
    }
}

/// A record is critical when trust did not pass or its Reality Index is below 6.0.
pub fn is_critical(trust: TrustStatus, reality_index: f64) -> bool {
    trust != TrustStatus::Pass || reality_index < CRITICAL_REALITY_THRESHOLD
}

/// Fraction of `true` flags; `0.0` for an empty window.
pub fn critical_rate(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return 0.0;
    }
    flags.iter().filter(|&&critical| critical).count() as f64 / flags.len() as f64
}

/// Drift and critical-rate summary over a window of complete records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergenceSummary {
    pub window_size: usize,
    pub drift: DriftReport,
    pub critical_rate: f64,
    pub last_score: Option<f64>,
}

impl EmergenceSummary {
    /// Builds a summary from chronological `(trust, reality_index)` pairs, newest last.
    pub fn from_window(window: &[(TrustStatus, f64)], config: &DriftConfig) -> Self {
        let reality: Vec<f64> = window.iter().map(|&(_, score)| score).collect();
        let flags: Vec<bool> = window
            .iter()
            .map(|&(trust, score)| is_critical(trust, score))
            .collect();

        Self {
            window_size: window.len(),
            drift: detect_drift(&reality, config),
            critical_rate: critical_rate(&flags),
            last_score: reality.last().copied(),
        }
    }
}
