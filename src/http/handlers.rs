//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::response::respond;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{parse_state_id, UpstreamRoute};

/// `GET /api/v1/states`
pub async fn list_states(State(state): State<AppState>) -> Response {
    forward(&state, UpstreamRoute::States, Instant::now()).await
}

/// `GET /api/v1/cities/{state}`
pub async fn list_cities(
    State(state): State<AppState>,
    raw: Result<Path<String>, PathRejection>,
) -> Response {
    let start = Instant::now();
    let raw = match raw {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable state parameter");
            return bad_request(start);
        }
    };

    match parse_state_id(&raw) {
        Ok(state_id) => forward(&state, UpstreamRoute::Cities { state_id }, start).await,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting cities request");
            bad_request(start)
        }
    }
}

/// `GET /api/v1/cities/` with an empty parameter.
pub async fn missing_state() -> Response {
    bad_request(Instant::now())
}

/// Anything that is not one of the two routes.
pub async fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Rejected before any upstream call; latency covers parameter validation only.
fn bad_request(start: Instant) -> Response {
    metrics::record_request("cities", StatusCode::BAD_REQUEST.as_u16(), start);
    StatusCode::BAD_REQUEST.into_response()
}

async fn forward(state: &AppState, route: UpstreamRoute, start: Instant) -> Response {
    let upstream_start = Instant::now();
    let url = route.url(state.upstream.base_url());

    tracing::debug!(route = route.name(), url = %url, "Forwarding request");

    let result = state.upstream.fetch(&url).await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_upstream(route.name(), outcome, upstream_start);

    let response = respond(result);
    metrics::record_request(route.name(), response.status().as_u16(), start);
    response
}
