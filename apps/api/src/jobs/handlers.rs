//! Axum route handlers for the Jobs API.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    Json,
};
use crate::errors::AppError;
use crate::jobs::search::{search_jobs, SearchRequest};
use crate::models::job::JobSearchResult;
use crate::state::AppState;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub location: Option<String>,
}

impl JobSearchQuery {
    /// Repeated keys keep their first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" if query.q.is_none() => query.q = Some(value),
                "location" if query.location.is_none() => query.location = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// GET /api/jobs?q=<query>&location=<location>
///
/// Returns `{"jobs": [...]}`. Mock listings when no SerpApi key is configured.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<JobSearchResult>, AppError> {
    let params = JobSearchQuery::from_pairs(pairs);
    let request = SearchRequest {
        query: params.q,
        location: params.location,
        origin: caller_origin(&headers, connect_info.map(|ConnectInfo(addr)| addr)),
    };

    let result = search_jobs(state.provider.as_deref(), state.events.as_ref(), &request).await?;

    Ok(Json(result))
}

/// Best-effort client address: proxy headers first, then the socket peer.
fn caller_origin(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
