use anyhow::{bail, Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Cross-origin policy for the browser front-end: a fixed origin list,
/// GET/POST/OPTIONS, and credentials allowed.
///
/// A wildcard origin cannot be combined with credentials, so `*` is refused.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.iter().any(|origin| origin == "*") {
        bail!("CORS origin '*' is not allowed when credentials are enabled");
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true))
}
