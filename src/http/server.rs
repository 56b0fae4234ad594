//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both gateway routes
//! - Wire up middleware (request id, tracing, CORS, security headers,
//!   compression, timeout)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{request_id, with_request_id};
use crate::lifecycle::ShutdownSignal;
use crate::security::{cors::cors_layer, headers::with_security_headers};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, url::ParseError> {
        let router = build_router(&config)?;
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Run the server until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &GatewayConfig) -> Result<Router, url::ParseError> {
    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(&config.upstream)?),
    };

    let router = Router::new()
        .route("/api/v1/states", get(handlers::list_states))
        .route("/api/v1/cities/", get(handlers::missing_state))
        .route("/api/v1/cities/{state}", get(handlers::list_cities))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "http.request",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id(req),
            )
        }));

    let mut router = with_request_id(router);

    if config.security.enable_headers {
        router = with_security_headers(router);
    }
    if config.security.compression {
        router = router.layer(CompressionLayer::new());
    }

    Ok(router
        .layer(cors_layer(&config.cors))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))))
}
