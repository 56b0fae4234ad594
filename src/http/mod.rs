//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (parameter check, upstream URL)
//!     → [upstream client performs the GET]
//!     → response.rs (normalize, map errors to status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{normalize, respond, UpstreamItem};
pub use server::{build_router, AppState, HttpServer};
