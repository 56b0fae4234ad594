//! States/cities gateway library.
//!
//! Forwards `GET /api/v1/states` and `GET /api/v1/cities/{state}` to a single
//! upstream API, keeps only `id` and `name` of every record, and answers with
//! CORS and security headers applied.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
