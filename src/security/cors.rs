//! Cross-origin allow-list.
//!
//! Only origins listed in [`CorsConfig`] get `access-control-allow-origin`.
//! Everything else is answered normally but without permissive headers, so
//! browsers refuse to hand the body to the calling page.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

use crate::config::CorsConfig;

/// Reduce a configured origin to the `scheme://host[:port]` form browsers send.
///
/// Returns `None` for anything that is not an http(s) origin.
pub fn normalize_origin(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    let origin = url.origin().ascii_serialization();
    HeaderValue::from_str(&origin).ok()?;
    Some(origin)
}

/// Build the CORS layer for the current mode.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .effective_origins()
        .into_iter()
        .filter_map(normalize_origin)
        .filter_map(|o| HeaderValue::from_str(&o).ok())
        .collect();

    tracing::debug!(
        origins = ?origins,
        development = config.development,
        "CORS allow-list configured"
    );

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .max_age(Duration::from_secs(config.max_age_secs))
}
