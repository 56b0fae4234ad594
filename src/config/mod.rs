//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → loader.rs (PORT / GATEWAY_ENV overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the gateway runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::UpstreamConfig;
pub use schema::CorsConfig;
