//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, `state` parameter)
//!     → route.rs (parameter validation)
//!     → UpstreamRoute (States | Cities { state_id })
//!     → route.rs (upstream URL against the configured base)
//! ```
//!
//! # Design Decisions
//! - Exactly two routes, fixed at compile time
//! - Invalid parameters are rejected before any upstream traffic
//! - Deterministic: same input always yields the same upstream URL

pub mod route;

pub use route::{parse_state_id, InvalidStateId, StateId, UpstreamRoute};
