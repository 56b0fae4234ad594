//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single upstream API every route forwards to.
    pub upstream: UpstreamConfig,

    /// Cross-origin allow-list.
    pub cors: CorsConfig,

    /// Response hardening.
    pub security: SecurityConfig,

    /// Whole-request timeout applied by the server.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{}", DEFAULT_PORT),
        }
    }
}

/// Port the gateway listens on when neither the config file nor `PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 3001;

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API, without a trailing path.
    pub base_url: String,

    /// Upper bound on one upstream call (connect, headers and body) in seconds.
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Largest upstream body the gateway will buffer.
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://mis-api.dev.br-mediagroup.com".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            max_body_bytes: 4 * 1024 * 1024, // 4MB
        }
    }
}

/// CORS allow-list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins that always receive permissive CORS headers.
    pub allowed_origins: Vec<String>,

    /// Origins added only when `development` is set.
    pub development_origins: Vec<String>,

    /// Development mode (also enabled by `GATEWAY_ENV=development`).
    pub development: bool,

    /// Preflight cache lifetime in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["https://victoralvess.github.io".to_string()],
            development_origins: vec!["http://localhost:3000".to_string()],
            development: false,
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    /// Every origin in effect for the current mode, in configuration order.
    pub fn effective_origins(&self) -> Vec<&str> {
        let mut origins: Vec<&str> = self.allowed_origins.iter().map(String::as_str).collect();
        if self.development {
            origins.extend(self.development_origins.iter().map(String::as_str));
        }
        origins
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Enable gzip response compression.
    pub compression: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            compression: true,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
