//! Metrics collection.
//!
//! # Metrics
//! - `rest_attempts_total` (counter): round-trips by outcome
//! - `rest_calls_total` (counter): finished calls by result
//! - `rest_call_duration_seconds` (histogram): whole-call latency
//!
//! Recording is a no-op until the embedding process installs a `metrics`
//! recorder.

use std::time::Duration;

/// Record one finished round-trip.
pub fn record_attempt(outcome: &'static str) {
    metrics::counter!("rest_attempts_total", "outcome" => outcome).increment(1);
}

/// Record one finished call and its total duration.
pub fn record_call(result: &'static str, elapsed: Duration) {
    metrics::counter!("rest_calls_total", "result" => result).increment(1);
    metrics::histogram!("rest_call_duration_seconds", "result" => result)
        .record(elapsed.as_secs_f64());
}
