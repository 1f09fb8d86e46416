use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use credit_ai::workflows::eligibility::{EligibilityEngine, UnderwritingConfig};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared, stateless pipeline facade handed to the routes.
#[derive(Clone)]
pub(crate) struct PipelineState {
    pub(crate) engine: Arc<EligibilityEngine>,
}

impl PipelineState {
    pub(crate) fn new(config: UnderwritingConfig) -> Self {
        Self {
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }
}
