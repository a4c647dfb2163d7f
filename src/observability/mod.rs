//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! directory + http subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Normalization fallbacks are exported, not hidden, so data quality
//!   problems upstream stay visible
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
