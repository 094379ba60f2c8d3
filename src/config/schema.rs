//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the transport.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the REST transport.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransportConfig {
    /// Process-wide HTTP client settings.
    pub http: HttpClientConfig,

    /// Default timeouts stamped on envelopes built by `RestClient`.
    pub timeouts: TimeoutConfig,

    /// Backoff schedule between retryable failures.
    pub backoff: BackoffConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings for the shared HTTP client.
///
/// These are fixed when the client is built and shared read-only by every call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Minimum accepted TLS protocol version ("1.2" or "1.3").
    pub min_tls_version: String,

    /// Disable small-packet coalescing (Nagle) on every connection.
    pub tcp_nodelay: bool,

    /// Connection establishment timeout in seconds (0 = none).
    pub connect_timeout_secs: u64,

    /// How long an idle pooled connection is kept, in seconds.
    pub pool_idle_timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Honour proxy settings from the environment (`HTTPS_PROXY` etc.).
    pub use_system_proxy: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            min_tls_version: "1.2".to_string(),
            tcp_nodelay: true,
            connect_timeout_secs: 10,
            pool_idle_timeout_secs: 90,
            user_agent: concat!("resilient-rest/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Timeout configuration. A value of 0 means "no limit".
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-call timeout spanning every retry, in seconds.
    pub rest_timeout_secs: u64,

    /// Timeout of each individual HTTP round-trip, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            rest_timeout_secs: 0,
            http_timeout_secs: 16,
        }
    }
}

impl TimeoutConfig {
    pub fn rest_timeout(&self) -> Option<Duration> {
        secs_or_unbounded(self.rest_timeout_secs)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        secs_or_unbounded(self.http_timeout_secs)
    }
}

fn secs_or_unbounded(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Backoff schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Delay before the first retry in milliseconds.
    pub initial_ms: u64,

    /// Ceiling for the doubling delay in milliseconds.
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_ms: 1_000,
            max_ms: 16_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record attempt and call metrics.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
