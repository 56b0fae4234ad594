//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream URL (from routing)
//!     → client.rs (GET, status check, bounded body read, JSON parse)
//!     → Result<serde_json::Value, ProxyError>
//!     → http::response (normalization)
//! ```

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::ProxyError;
