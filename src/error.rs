//! Error types crossing the transport boundary.

use std::time::Duration;
use thiserror::Error;

/// A transport-level failure that is not attributable to either cancellation
/// source. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP stack rejected or failed the request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request envelope could not be turned into an HTTP request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The client settings cannot be applied.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// Connection-level failure reported by a non-reqwest transport.
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Terminal outcome of a failed call.
#[derive(Debug, Error)]
pub enum RestError {
    /// The caller withdrew the call.
    #[error("Request cancelled by caller")]
    Cancelled,

    /// Retryable failures persisted until the whole-call budget ran out.
    #[error("Request timed out after {attempts} attempts ({elapsed:?} elapsed)")]
    Timeout { attempts: u32, elapsed: Duration },

    /// Non-retryable transport failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body was not the expected JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RestError {
    /// True when the call ended because the caller cancelled it.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RestError::Cancelled)
    }

    /// True when the whole-call budget was exhausted.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout { .. })
    }
}

/// Result type for REST calls.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let cancelled = RestError::Cancelled;
        let timeout = RestError::Timeout {
            attempts: 4,
            elapsed: Duration::from_secs(5),
        };
        let fatal = RestError::from(TransportError::Connection("refused".into()));

        assert!(cancelled.is_cancelled() && !cancelled.is_timeout());
        assert!(timeout.is_timeout() && !timeout.is_cancelled());
        assert!(!fatal.is_timeout() && !fatal.is_cancelled());
        assert!(timeout.to_string().contains("4 attempts"));
        assert_eq!(fatal.to_string(), "Transport error: Connection error: refused");
    }
}
