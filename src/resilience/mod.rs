//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! execute(request)                          (retries.rs)
//!     → CallBudget::start(rest_timeout)      (timeouts.rs)
//!     → loop:
//!         attempt_deadline(http_timeout, remaining)
//!         → run_attempt → AttemptOutcome     (attempt.rs)
//!         → Success / Fatal / Cancelled: return
//!         → Retryable: sleep Backoff::next_delay  (backoff.rs)
//! ```
//!
//! # Design Decisions
//! - Two timeout scopes: the whole call and each round-trip
//! - Classification happens at the attempt boundary, never by inspecting
//!   errors after the fact
//! - Backoff is deterministic (no jitter): 1, 2, 4, 8, 16, 16, ... units

pub mod attempt;
pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use attempt::{AbortSource, AttemptOutcome, RetryReason};
pub use backoff::{Backoff, BackoffPolicy};
pub use retries::{execute, CallState, RetryPolicy};
pub use timeouts::CallBudget;
