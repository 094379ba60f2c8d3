//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! retry loop and attempts produce:
//!     → logging.rs (structured log events, one span per call)
//!     → metrics.rs (attempt and call counters, call latency)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every call span
//! - Metrics are cheap (atomic increments) and optional

pub mod logging;
pub mod metrics;
