use std::sync::Arc;

use symbi::{AssessmentPipeline, InMemoryMetrics, KvStore};

#[derive(Clone)]
pub struct HandlerState<S: KvStore + Clone> {
    pub pipeline: AssessmentPipeline<S>,

    pub metrics: Arc<InMemoryMetrics>,

    pub debug_routes: bool,
}

impl<S: KvStore + Clone> HandlerState<S> {
    /// Wires an [`InMemoryMetrics`] sink into the pipeline so `/metrics` can report it.
    pub fn new(pipeline: AssessmentPipeline<S>) -> Self {
        let metrics = Arc::new(InMemoryMetrics::new());
        Self {
            pipeline: pipeline.with_metrics(metrics.clone()),
            metrics,
            debug_routes: false,
        }
    }

    pub fn with_debug_routes(mut self, enabled: bool) -> Self {
        self.debug_routes = enabled;
        self
    }
}
