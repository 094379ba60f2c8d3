//! Retry loop.
//!
//! # State Transitions
//! ```text
//! Idle → Attempting
//! Attempting → Succeeded   (success status)
//! Attempting → Cancelled   (caller cancellation, during attempt or backoff)
//! Attempting → Failed      (fatal transport error, or retryable with no budget left)
//! Attempting → Retrying    (retryable with budget left) → sleep → Attempting
//! ```
//!
//! # Design Decisions
//! - Attempts are strictly sequential; one round-trip in flight per call
//! - Retryable failures repeat until the whole-call budget runs out
//! - The first attempt always runs, even on an already-exhausted budget
//! - Backoff sleeps are clipped to the remaining budget and abort on cancel

use tracing::Instrument;

use crate::error::{RestError, RestResult};
use crate::http::client::Transport;
use crate::http::request::RestRequest;
use crate::http::response::RestResponse;
use crate::lifecycle::cancel::CancelToken;
use crate::observability::metrics;
use crate::resilience::attempt::{run_attempt, AttemptOutcome};
use crate::resilience::backoff::{Backoff, BackoffPolicy};
use crate::resilience::timeouts::{attempt_deadline, CallBudget};

/// Position of a call in its retry state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Attempting,
    Retrying,
    Succeeded,
    Failed,
    Cancelled,
}

impl CallState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CallState::Succeeded | CallState::Failed | CallState::Cancelled)
    }
}

/// State a call moves to after an attempt finishes.
pub fn transition(outcome: &AttemptOutcome, budget_left: bool) -> CallState {
    match outcome {
        AttemptOutcome::Success(_) => CallState::Succeeded,
        AttemptOutcome::Cancelled => CallState::Cancelled,
        AttemptOutcome::Fatal(_) => CallState::Failed,
        AttemptOutcome::Retryable(_) if budget_left => CallState::Retrying,
        AttemptOutcome::Retryable(_) => CallState::Failed,
    }
}

/// Retry settings shared by every call of a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    pub backoff: BackoffPolicy,
    pub record_metrics: bool,
}

/// Execute `request` until success, fatal failure, cancellation or
/// whole-call timeout.
pub async fn execute<T: Transport>(
    transport: &T,
    policy: &RetryPolicy,
    request: &RestRequest,
    cancel: &CancelToken,
) -> RestResult<RestResponse> {
    let span = tracing::debug_span!(
        "rest_call",
        request_id = %request.request_id,
        method = %request.method,
        url = %request.url,
    );

    async {
        let budget = CallBudget::start(request.rest_timeout);
        let result = retry_loop(transport, policy, request, cancel, &budget).await;

        if policy.record_metrics {
            metrics::record_call(call_result_label(&result), budget.elapsed());
        }
        result
    }
    .instrument(span)
    .await
}

async fn retry_loop<T: Transport>(
    transport: &T,
    policy: &RetryPolicy,
    request: &RestRequest,
    cancel: &CancelToken,
    budget: &CallBudget,
) -> RestResult<RestResponse> {
    let mut backoff = Backoff::new(&policy.backoff);
    let mut attempts: u32 = 0;
    let mut state = CallState::Idle;

    loop {
        if cancel.is_cancelled() {
            return Err(RestError::Cancelled);
        }

        let deadline = if budget.is_exhausted() {
            if attempts > 0 {
                return Err(timeout_error(attempts, budget));
            }
            // Budget gone before anything ran: one attempt still goes out.
            request.http_timeout
        } else {
            attempt_deadline(request.http_timeout, budget.remaining())
        };

        attempts += 1;
        tracing::trace!(
            attempt = attempts,
            from = ?state,
            deadline = ?deadline,
            "Attempting request"
        );
        state = CallState::Attempting;

        let outcome = run_attempt(transport, request, deadline, cancel).await;
        if policy.record_metrics {
            metrics::record_attempt(outcome.label());
        }

        let next = transition(&outcome, !budget.is_exhausted());
        tracing::trace!(attempt = attempts, from = ?state, to = ?next, "Attempt finished");
        state = next;

        match outcome {
            AttemptOutcome::Success(response) => {
                if attempts > 1 {
                    tracing::info!(attempts, "Retried request succeeded");
                }
                tracing::trace!(status = %response.status, "Success response");
                return Ok(response);
            }
            AttemptOutcome::Cancelled => return Err(RestError::Cancelled),
            AttemptOutcome::Fatal(e) => {
                tracing::warn!(attempt = attempts, error = %e, "Request failed, not retrying");
                return Err(e.into());
            }
            AttemptOutcome::Retryable(reason) => {
                if state != CallState::Retrying {
                    return Err(timeout_error(attempts, budget));
                }

                let delay = backoff.next_delay();
                let sleep_for = budget.remaining().map_or(delay, |left| delay.min(left));
                tracing::debug!(
                    attempt = attempts,
                    reason = ?reason,
                    delay = ?sleep_for,
                    "Sleeping before retrying the request"
                );

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(RestError::Cancelled),
                    _ = tokio::time::sleep(sleep_for) => {}
                }
            }
        }
    }
}

fn timeout_error(attempts: u32, budget: &CallBudget) -> RestError {
    let elapsed = budget.elapsed();
    tracing::warn!(attempts, elapsed = ?elapsed, "REST request timed out, giving up");
    RestError::Timeout { attempts, elapsed }
}

fn call_result_label(result: &RestResult<RestResponse>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(RestError::Cancelled) => "cancelled",
        Err(RestError::Timeout { .. }) => "timeout",
        Err(_) => "fatal",
    }
}
