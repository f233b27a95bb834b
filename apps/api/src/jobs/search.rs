//! Source selection for a job search: validation, mock mode or live provider.

use crate::errors::AppError;
use crate::jobs::mock::mock_jobs;
use crate::jobs::normalizer::{normalize, raw_result_count};
use crate::models::job::JobSearchResult;
use crate::provider::JobProvider;
use crate::telemetry::{EventRecorder, SearchEvent};

pub const MISSING_QUERY: &str = "query parameter is required";

/// One validated-or-not search as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub location: Option<String>,
    /// Caller address, for logging only.
    pub origin: String,
}

/// Runs one search.
///
/// - empty or missing query → `AppError::Validation`, provider untouched
/// - no provider → mock listings
/// - provider → normalized provider listings; failures are returned as-is,
///   never retried
pub async fn search_jobs(
    provider: Option<&dyn JobProvider>,
    events: &dyn EventRecorder,
    request: &SearchRequest,
) -> Result<JobSearchResult, AppError> {
    let query = request.query.as_deref().unwrap_or_default();
    let location = request.location.as_deref().unwrap_or_default();
    let origin = request.origin.as_str();

    events.record(&SearchEvent::Requested {
        query,
        location,
        origin,
    });

    if query.is_empty() {
        events.record(&SearchEvent::MissingQuery { origin });
        return Err(AppError::Validation(MISSING_QUERY.to_string()));
    }

    let Some(provider) = provider else {
        let result = mock_jobs(query, location);
        events.record(&SearchEvent::MockServed {
            query,
            location,
            job_count: result.jobs.len(),
        });
        return Ok(result);
    };

    events.record(&SearchEvent::ProviderCalled { query, location });

    let document = match provider.search(query, location).await {
        Ok(document) => document,
        Err(e) => {
            events.record(&SearchEvent::ProviderFailed {
                query,
                location,
                error: &e.to_string(),
            });
            return Err(AppError::Provider(e));
        }
    };

    let result = normalize(&document);
    match raw_result_count(&document) {
        Some(raw_results) => events.record(&SearchEvent::Normalized {
            raw_results,
            transformed_jobs: result.jobs.len(),
        }),
        None => events.record(&SearchEvent::NoResultsField),
    }
    events.record(&SearchEvent::ProviderSucceeded {
        query,
        location,
        job_count: result.jobs.len(),
    });

    Ok(result)
}
