//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backoff delays, TLS versions)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TransportConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::TransportConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `backoff.max_ms`).
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub const SUPPORTED_TLS_VERSIONS: &[&str] = &["1.2", "1.3"];

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &TransportConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !SUPPORTED_TLS_VERSIONS.contains(&config.http.min_tls_version.as_str()) {
        errors.push(ValidationError::new(
            "http.min_tls_version",
            format!(
                "unsupported TLS version '{}', expected one of {:?}",
                config.http.min_tls_version, SUPPORTED_TLS_VERSIONS
            ),
        ));
    }

    if config.http.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("http.user_agent", "must not be empty"));
    }

    if config.backoff.initial_ms == 0 {
        errors.push(ValidationError::new("backoff.initial_ms", "must be greater than 0"));
    }

    if config.backoff.max_ms < config.backoff.initial_ms {
        errors.push(ValidationError::new(
            "backoff.max_ms",
            format!(
                "must be >= backoff.initial_ms ({} < {})",
                config.backoff.max_ms, config.backoff.initial_ms
            ),
        ));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown log level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
