//! Single-attempt execution.
//!
//! # Responsibilities
//! - Issue exactly one round-trip under an attempt-scoped abort signal
//! - Classify the result so the retry loop never inspects errors itself
//!
//! # Classification
//! ```text
//! success status                     → Success
//! non-success status (any value)     → Retryable(Status)
//! caller cancellation fired          → Cancelled
//! attempt deadline fired             → Retryable(AttemptTimeout)
//! any other transport error          → Fatal
//! ```
//!
//! # Design Decisions
//! - The abort signal is the OR of caller cancellation and the attempt
//!   deadline, but its source is kept as an `AbortSource` tag
//! - Caller cancellation wins when both fire together

use reqwest::StatusCode;
use std::time::Duration;

use crate::error::TransportError;
use crate::http::client::Transport;
use crate::http::request::RestRequest;
use crate::http::response::RestResponse;
use crate::lifecycle::cancel::CancelToken;

/// Which signal aborted an in-flight attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortSource {
    Caller,
    AttemptDeadline,
}

/// Why an attempt may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// The round-trip completed with a non-success status.
    Status(StatusCode),
    /// The per-attempt deadline elapsed before the round-trip completed.
    AttemptTimeout(Duration),
}

/// Result of one round-trip.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(RestResponse),
    Retryable(RetryReason),
    Fatal(TransportError),
    Cancelled,
}

impl AttemptOutcome {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::Retryable(RetryReason::Status(_)) => "status",
            AttemptOutcome::Retryable(RetryReason::AttemptTimeout(_)) => "timeout",
            AttemptOutcome::Fatal(_) => "fatal",
            AttemptOutcome::Cancelled => "cancelled",
        }
    }
}

/// Run one round-trip of `request`, bounded by `deadline` and `cancel`.
///
/// `deadline` of `None` leaves the attempt bounded only by `cancel`.
pub async fn run_attempt<T: Transport>(
    transport: &T,
    request: &RestRequest,
    deadline: Option<Duration>,
    cancel: &CancelToken,
) -> AttemptOutcome {
    let round_trip = transport.send(request);
    let bounded = async {
        match deadline {
            Some(limit) => tokio::time::timeout(limit, round_trip)
                .await
                .map_err(|_| AbortSource::AttemptDeadline),
            None => Ok(round_trip.await),
        }
    };

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AbortSource::Caller),
        result = bounded => result,
    };

    classify(result, deadline)
}

fn classify(
    result: Result<Result<RestResponse, TransportError>, AbortSource>,
    deadline: Option<Duration>,
) -> AttemptOutcome {
    match result {
        Ok(Ok(response)) if response.is_success() => AttemptOutcome::Success(response),
        Ok(Ok(response)) => {
            tracing::trace!(status = %response.status, body = %response.text(), "Failed response");
            AttemptOutcome::Retryable(RetryReason::Status(response.status))
        }
        Ok(Err(e)) => AttemptOutcome::Fatal(e),
        Err(AbortSource::Caller) => {
            tracing::debug!("REST request cancelled by caller");
            AttemptOutcome::Cancelled
        }
        Err(AbortSource::AttemptDeadline) => {
            let limit = deadline.unwrap_or_default();
            tracing::warn!(timeout = ?limit, "HTTP request timed out, will retry");
            AttemptOutcome::Retryable(RetryReason::AttemptTimeout(limit))
        }
    }
}
