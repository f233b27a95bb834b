use std::sync::Arc;

use crate::config::Config;
use crate::provider::{JobProvider, SerpApiClient};
use crate::telemetry::{EventRecorder, TracingRecorder};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live search backend. `None` means mock mode (no SerpApi key configured).
    pub provider: Option<Arc<dyn JobProvider>>,
    pub events: Arc<dyn EventRecorder>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let provider = config.serpapi_key.clone().map(|api_key| {
            Arc::new(SerpApiClient::new(api_key, &config.serpapi_base_url)) as Arc<dyn JobProvider>
        });

        Self {
            provider,
            events: Arc::new(TracingRecorder),
        }
    }
}
