use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::provider::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Provider(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed",
                    "message": e.to_string()
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
