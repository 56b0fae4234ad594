//! Request identification.
//!
//! # Responsibilities
//! - Give every request an `x-request-id` (UUID v4) unless the client sent one
//! - Echo the id on the response
//! - Expose the id to the trace span
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing

use axum::{
    body::Body,
    http::{HeaderName, Request},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Wrap a router with request id generation and propagation.
///
/// Must be applied outside the trace layer so spans can see the id.
pub fn with_request_id(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

/// The request id of an inbound request, or `""` before one is assigned.
pub fn request_id(req: &Request<Body>) -> &str {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        with_request_id(Router::new().route(
            "/id",
            get(|req: Request<Body>| async move { request_id(&req).to_string() }),
        ))
    }

    #[tokio::test]
    async fn test_generates_and_echoes_id() {
        let res = app()
            .oneshot(Request::builder().uri("/id").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let echoed = res.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap().to_string();
        assert_eq!(echoed.len(), 36);

        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(body, echoed.as_bytes());
    }

    #[tokio::test]
    async fn test_keeps_client_id() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/id")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.headers().get(X_REQUEST_ID).unwrap(), "abc-123");
    }
}
