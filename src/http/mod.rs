//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! request
//!     → request.rs (x-request-id set + propagated)
//!     → server.rs (routing, timeout, trace)
//!     → handlers.rs (decode query → FilterState → engine)
//!     → response.rs (JSON payloads)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
