//! Security response headers.
//!
//! # Responsibilities
//! - Disable MIME sniffing and framing by other sites
//! - Suppress referrer leakage and DNS prefetching
//!
//! # Design Decisions
//! - Headers are only added when a handler has not set them already
//! - Applied to every response, errors included

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers added to every response.
pub const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
];

/// Wrap a router so every response carries [`SECURITY_HEADERS`].
pub fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ))
        })
}
