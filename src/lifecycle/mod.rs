//! Call lifecycle.
//!
//! # Data Flow
//! ```text
//! Caller (cancel.rs):
//!     CancelToken created per call → passed to execute()
//!     → observed by the in-flight attempt and by the backoff sleep
//!
//! Signals (signals.rs):
//!     SIGINT → CancelToken::cancel()
//! ```

pub mod cancel;
pub mod signals;

pub use cancel::CancelToken;
