use std::time::Duration;

use crate::constants::{DEFAULT_DRIFT_WINDOW, DEFAULT_PROCESSING_TIMEOUT_MS};
use crate::drift::DriftConfig;

/// Orchestrator settings. Usually derived from [`Config::pipeline_config`](crate::config::Config::pipeline_config).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Upper bound on background scoring.
    pub processing_timeout: Duration,
    /// Complete records in the drift window, newest included.
    pub drift_window: usize,
    pub drift: DriftConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            processing_timeout: Duration::from_millis(DEFAULT_PROCESSING_TIMEOUT_MS),
            drift_window: DEFAULT_DRIFT_WINDOW,
            drift: DriftConfig::default(),
        }
    }
}
