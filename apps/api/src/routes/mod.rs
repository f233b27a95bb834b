pub mod cors;
pub mod health;

use axum::{routing::get, Router};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/jobs", get(handlers::handle_search_jobs))
        .with_state(state)
}
