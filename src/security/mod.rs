//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → cors.rs (allow-list check, preflight handling)
//!     → headers.rs (nosniff, frame options, referrer policy)
//!     → Sent to client
//! ```
//!
//! # Design Decisions
//! - Fail closed: unknown origins never get permissive headers
//! - No trust in client input

pub mod cors;
pub mod headers;
