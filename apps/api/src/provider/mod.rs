/// Provider client: the single point of entry for outbound job searches.
///
/// No other module talks to SerpApi directly. Locale and engine settings are
/// pinned here and are not caller-configurable.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "/search.json";
pub const ENGINE: &str = "google_jobs";
const GOOGLE_DOMAIN: &str = "google.co.id";
const COUNTRY: &str = "id";
const LANGUAGE: &str = "id";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to make request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider response is not a JSON object")]
    UnexpectedShape,
}

/// Anything that can answer a job search with a raw provider document.
///
/// Carried in `AppState` as `Option<Arc<dyn JobProvider>>`; `None` is mock mode.
#[async_trait]
pub trait JobProvider: Send + Sync {
    async fn search(&self, query: &str, location: &str) -> Result<Value, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: String,
}

/// SerpApi-backed provider using the `google_jobs` engine.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl JobProvider for SerpApiClient {
    async fn search(&self, query: &str, location: &str) -> Result<Value, ProviderError> {
        info!(
            query = %query,
            location = %location,
            engine = ENGINE,
            "Calling SerpApi"
        );

        let response = self
            .client
            .get(self.search_url())
            .query(&search_params(query, location, &self.api_key))
            .send()
            .await
            .map_err(|e| {
                warn!("SerpApi request failed: {e}");
                ProviderError::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("SerpApi returned {}: {}", status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let document = check_document(serde_json::from_str(&body)?)?;

        if let Some(status) = document
            .get("search_metadata")
            .and_then(|m| m.get("status"))
            .and_then(Value::as_str)
        {
            debug!(search_status = %status, "SerpApi search metadata");
        }

        info!("Received SerpApi response");
        Ok(document)
    }
}

/// Query string for one search. Everything except `q`, `location` and the
/// key is fixed.
fn search_params<'a>(
    query: &'a str,
    location: &'a str,
    api_key: &'a str,
) -> [(&'static str, &'a str); 7] {
    [
        ("engine", ENGINE),
        ("q", query),
        ("location", location),
        ("google_domain", GOOGLE_DOMAIN),
        ("gl", COUNTRY),
        ("hl", LANGUAGE),
        ("api_key", api_key),
    ]
}

/// Prefers the provider's own `error` field over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ProviderErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// SerpApi reports bad keys and bad queries as a 200 with an `error` field.
fn check_document(document: Value) -> Result<Value, ProviderError> {
    let Some(object) = document.as_object() else {
        return Err(ProviderError::UnexpectedShape);
    };
    if let Some(message) = object.get("error").and_then(Value::as_str) {
        return Err(ProviderError::Provider(message.to_string()));
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use super::*;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_search_sends_pinned_params_and_returns_document() {
        let router = Router::new().route(
            "/search.json",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "search_metadata": { "status": "Success" },
                    "jobs_results": [{ "title": "Rust Engineer" }],
                    "echo": params
                }))
            }),
        );
        let client = SerpApiClient::new("key-123".into(), serve(router).await);

        let document = client.search("rust", "Jakarta").await.unwrap();

        assert_eq!(document["jobs_results"][0]["title"], "Rust Engineer");
        let echo = &document["echo"];
        assert_eq!(echo["engine"], "google_jobs");
        assert_eq!(echo["q"], "rust");
        assert_eq!(echo["location"], "Jakarta");
        assert_eq!(echo["gl"], "id");
        assert_eq!(echo["hl"], "id");
        assert_eq!(echo["google_domain"], "google.co.id");
        assert_eq!(echo["api_key"], "key-123");
    }

    #[tokio::test]
    async fn test_search_maps_error_status_to_api_error() {
        let router = Router::new().route(
            "/search.json",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid API key." })),
                )
            }),
        );
        let client = SerpApiClient::new("bad".into(), serve(router).await);

        let err = client.search("rust", "").await.unwrap_err();

        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_maps_non_json_body_to_parse_error() {
        let router = Router::new().route("/search.json", get(|| async { "<html>oops</html>" }));
        let client = SerpApiClient::new("k".into(), serve(router).await);

        let err = client.search("rust", "").await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_search_maps_error_field_to_provider_error() {
        let router = Router::new().route(
            "/search.json",
            get(|| async { Json(json!({ "error": "Google hasn't returned any results" })) }),
        );
        let client = SerpApiClient::new("k".into(), serve(router).await);

        let err = client.search("zzz", "").await.unwrap_err();
        assert!(matches!(err, ProviderError::Provider(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_search_maps_closed_port_to_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = SerpApiClient::new("k".into(), format!("http://{addr}"));

        let err = client.search("rust", "").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)), "got {err:?}");
    }

    #[test]
    fn test_search_params_pin_engine_and_locale() {
        let params = search_params("rust developer", "Jakarta", "key-123");
        assert!(params.contains(&("engine", "google_jobs")));
        assert!(params.contains(&("google_domain", "google.co.id")));
        assert!(params.contains(&("gl", "id")));
        assert!(params.contains(&("hl", "id")));
        assert!(params.contains(&("q", "rust developer")));
        assert!(params.contains(&("location", "Jakarta")));
        assert!(params.contains(&("api_key", "key-123")));
    }

    #[test]
    fn test_search_url_strips_trailing_slash() {
        let client = SerpApiClient::new("k".into(), "http://localhost:9999/");
        assert_eq!(client.search_url(), "http://localhost:9999/search.json");
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error": "Invalid API key."}"#),
            "Invalid API key."
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_check_document_rejects_error_payload() {
        let err = check_document(json!({ "error": "Google hasn't returned any results" }))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Provider(ref m) if m.contains("any results")));
    }

    #[test]
    fn test_check_document_rejects_non_object() {
        let err = check_document(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedShape));
    }

    #[test]
    fn test_check_document_passes_results_through() {
        let doc = json!({ "jobs_results": [], "search_metadata": { "status": "Success" } });
        assert_eq!(check_document(doc.clone()).unwrap(), doc);
    }
}
