//! Failures of a single upstream call.

use std::time::Duration;

use thiserror::Error;

/// Status used for every failure that is the upstream's fault but carries no
/// status of its own.
pub const BAD_GATEWAY: u16 = 502;

/// Why an upstream call produced no usable list.
///
/// Each variant maps to the status code the client sees via [`ProxyError::code`].
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream answered with something other than 200.
    #[error("upstream answered with status {0}")]
    Status(u16),

    /// Upstream body is not valid JSON.
    #[error("upstream body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Connection, DNS, or protocol failure before a response arrived.
    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read, or exceeded the size cap.
    #[error("failed to read upstream body: {0}")]
    Body(#[source] axum::Error),

    /// The outbound request could not be built.
    #[error("invalid upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),

    /// Valid JSON, but not an array of objects.
    #[error("unexpected upstream body shape: {0}")]
    Shape(&'static str),
}

impl ProxyError {
    /// The HTTP status the client receives for this failure.
    pub fn code(&self) -> u16 {
        match self {
            ProxyError::Status(code) => *code,
            _ => BAD_GATEWAY,
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Status(_) => "status",
            ProxyError::Parse(_) => "parse",
            ProxyError::Transport(_) | ProxyError::Body(_) | ProxyError::Request(_) => "transport",
            ProxyError::Timeout(_) => "timeout",
            ProxyError::Shape(_) => "shape",
        }
    }
}
