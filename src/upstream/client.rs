//! The upstream HTTP client.
//!
//! # Responsibilities
//! - Issue one GET per inbound request
//! - Reject any status other than 200 before touching the body
//! - Buffer the body (bounded) and parse it as JSON
//! - Bound the whole call with a deadline
//!
//! # Design Decisions
//! - No retries: a failed call is reported straight back to the client
//! - Dropping the returned future cancels the upstream call, which is what
//!   happens when the inbound client disconnects
//! - Connections are pooled by hyper-util; nothing else is shared

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode, Uri},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::error::ProxyError;

/// Client bound to the single configured upstream.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    base_url: Url,
    request_timeout: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    /// Create a client from validated configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(&config.base_url)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            base_url,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Base URL every route is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch(&self, url: &Url) -> Result<Value, ProxyError> {
        let start = Instant::now();

        let result = match tokio::time::timeout(self.request_timeout, self.get_json(url)).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout(self.request_timeout)),
        };

        match &result {
            Ok(_) => tracing::debug!(
                url = %url,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call succeeded"
            ),
            Err(e) => tracing::warn!(
                url = %url,
                kind = e.kind(),
                status = e.code(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Upstream call failed"
            ),
        }

        result
    }

    async fn get_json(&self, url: &Url) -> Result<Value, ProxyError> {
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| ProxyError::Request(e.into()))?;

        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())?;

        let response = self.client.request(request).await?;

        // Non-200 ends the call here; dropping the response releases the body.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProxyError::Status(status.as_u16()));
        }

        let body = Body::new(response.into_body());
        let bytes = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(ProxyError::Body)?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}
