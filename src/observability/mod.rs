//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of every request
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
