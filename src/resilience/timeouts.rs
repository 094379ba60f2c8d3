//! Timeout scopes.
//!
//! # Responsibilities
//! - Track the whole-call budget shared by every attempt of one call
//! - Derive each attempt's deadline from the per-attempt timeout and
//!   whatever is left of the whole-call budget
//!
//! # Design Decisions
//! - `None` means "no limit" at every level
//! - Uses `tokio::time::Instant` so paused-clock tests see the same budget

use std::time::Duration;
use tokio::time::Instant;

/// Whole-call deadline, fixed when the call starts.
#[derive(Debug, Clone, Copy)]
pub struct CallBudget {
    started: Instant,
    deadline: Option<Instant>,
}

impl CallBudget {
    /// Start the clock. `limit` of `None` never runs out.
    pub fn start(limit: Option<Duration>) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: limit.map(|limit| started + limit),
        }
    }

    /// Time left, or `None` when unbounded. Zero once exhausted.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// The lesser of the per-attempt timeout and the remaining budget.
///
/// An unbounded side always loses to a bounded one.
pub fn attempt_deadline(
    per_attempt: Option<Duration>,
    remaining: Option<Duration>,
) -> Option<Duration> {
    match (per_attempt, remaining) {
        (Some(attempt), Some(left)) => Some(attempt.min(left)),
        (attempt, None) => attempt,
        (None, left) => left,
    }
}
