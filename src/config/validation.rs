//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Keep the inbound deadline longer than the upstream one, so a slow
//!   upstream surfaces as 502 rather than the timeout layer's 408
//! - Check the upstream URL is something the HTTP client can reach
//! - Check every CORS origin is a real origin
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::security::cors::normalize_origin;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{url}` is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error(
        "timeouts.request_secs ({inbound}) must be greater than \
         upstream.request_timeout_secs ({upstream})"
    )]
    TimeoutOrder { inbound: u64, upstream: u64 },

    #[error("cors origin `{0}` is not a valid origin")]
    Origin(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Err(reason) = check_upstream_url(&config.upstream.base_url) {
        errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason,
        });
    }

    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.request_timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("upstream.max_body_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    // Zero values are already reported above.
    let inbound = config.timeouts.request_secs;
    let upstream = config.upstream.request_timeout_secs;
    if inbound != 0 && upstream != 0 && inbound <= upstream {
        errors.push(ValidationError::TimeoutOrder { inbound, upstream });
    }

    // Development origins are checked even when inactive so that flipping the
    // flag can never produce an invalid allow-list.
    for origin in config
        .cors
        .allowed_origins
        .iter()
        .chain(config.cors.development_origins.iter())
    {
        if normalize_origin(origin).is_none() {
            errors.push(ValidationError::Origin(origin.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("scheme `{}` is not supported, use http", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() {
        return Err("query strings are not allowed".to_string());
    }
    Ok(())
}
