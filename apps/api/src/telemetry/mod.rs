//! Search events — the logging capability handed to the search handler.
//!
//! Search code never calls `tracing` for request milestones directly; it
//! records a `SearchEvent` on the `EventRecorder` carried in `AppState`.

pub mod subscriber;

use tracing::{error, info, warn};

/// Request milestones worth an operational log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent<'a> {
    Requested {
        query: &'a str,
        location: &'a str,
        origin: &'a str,
    },
    MissingQuery {
        origin: &'a str,
    },
    MockServed {
        query: &'a str,
        location: &'a str,
        job_count: usize,
    },
    ProviderCalled {
        query: &'a str,
        location: &'a str,
    },
    /// Provider answered without a usable `jobs_results` array.
    NoResultsField,
    Normalized {
        raw_results: usize,
        transformed_jobs: usize,
    },
    ProviderSucceeded {
        query: &'a str,
        location: &'a str,
        job_count: usize,
    },
    ProviderFailed {
        query: &'a str,
        location: &'a str,
        error: &'a str,
    },
}

impl SearchEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            SearchEvent::Requested { .. } => "requested",
            SearchEvent::MissingQuery { .. } => "missing_query",
            SearchEvent::MockServed { .. } => "mock_served",
            SearchEvent::ProviderCalled { .. } => "provider_called",
            SearchEvent::NoResultsField => "no_results_field",
            SearchEvent::Normalized { .. } => "normalized",
            SearchEvent::ProviderSucceeded { .. } => "provider_succeeded",
            SearchEvent::ProviderFailed { .. } => "provider_failed",
        }
    }
}

/// Sink for search events. Carried in `AppState` as `Arc<dyn EventRecorder>`.
pub trait EventRecorder: Send + Sync {
    fn record(&self, event: &SearchEvent<'_>);
}

/// Forwards events to `tracing`, which writes to the console and the log file.
pub struct TracingRecorder;

impl EventRecorder for TracingRecorder {
    fn record(&self, event: &SearchEvent<'_>) {
        let kind = event.name();
        match *event {
            SearchEvent::Requested {
                query,
                location,
                origin,
            } => info!(kind, query, location, origin, "[SEARCH REQUEST]"),
            SearchEvent::MissingQuery { origin } => {
                warn!(kind, origin, "[SEARCH ERROR] Missing query parameter")
            }
            SearchEvent::MockServed {
                query,
                location,
                job_count,
            } => info!(
                kind,
                query,
                location,
                job_count,
                "[SEARCH RESULT] SERPAPI_KEY not set, returned mock jobs"
            ),
            SearchEvent::ProviderCalled { query, location } => {
                info!(kind, query, location, "[SEARCH] Fetching from SerpApi")
            }
            SearchEvent::NoResultsField => {
                warn!(kind, "[API DATA] No jobs_results field in response")
            }
            SearchEvent::Normalized {
                raw_results,
                transformed_jobs,
            } => info!(
                kind,
                raw_results,
                transformed_jobs,
                "[API TRANSFORMED] Normalized provider results"
            ),
            SearchEvent::ProviderSucceeded {
                query,
                location,
                job_count,
            } => info!(
                kind,
                query,
                location,
                job_count,
                "[SEARCH RESULT] Retrieved jobs from SerpApi"
            ),
            SearchEvent::ProviderFailed {
                query,
                location,
                error,
            } => error!(kind, query, location, error, "[SEARCH ERROR] Failed to fetch jobs"),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps the name of every recorded event, in order.
    #[derive(Default)]
    pub struct RecordingRecorder {
        events: Mutex<Vec<String>>,
    }

    impl RecordingRecorder {
        pub fn names(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventRecorder for RecordingRecorder {
        fn record(&self, event: &SearchEvent<'_>) {
            self.events.lock().unwrap().push(event.name().to_string());
        }
    }
}
