//! Shared HTTP client.
//!
//! # Responsibilities
//! - Build the process-wide `reqwest::Client` once from configuration
//! - Apply the global transport settings (minimum TLS version, no Nagle)
//! - Perform exactly one round-trip per `send`, reading the whole body
//!
//! # Design Decisions
//! - The client is constructed explicitly and passed to every call site;
//!   there is no lazily-initialized global
//! - `reqwest::Client` pools connections internally and is safe to share;
//!   each call uses its own request/response values, so no locking is needed
//! - Timeouts are not set on the client: both timeout scopes belong to the
//!   retry layer
//! - TLS runs on rustls so both 1.2 and 1.3 floors can be enforced
//! - Certificate revocation (CRL/OCSP) is not checked

use std::future::Future;
use std::time::Duration;

use crate::config::HttpClientConfig;
use crate::error::TransportError;
use crate::http::request::RestRequest;
use crate::http::response::RestResponse;

/// One HTTP round-trip.
///
/// Implementations must be safe to share between unrelated concurrent calls.
pub trait Transport: Send + Sync {
    /// Send `request` once and read the full response.
    ///
    /// A non-success status is a response, not an error.
    fn send(
        &self,
        request: &RestRequest,
    ) -> impl Future<Output = Result<RestResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the shared client. Call once at startup.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self, TransportError> {
        let min_tls = match config.min_tls_version.as_str() {
            "1.2" => reqwest::tls::Version::TLS_1_2,
            "1.3" => reqwest::tls::Version::TLS_1_3,
            other => {
                return Err(TransportError::Config(format!(
                    "unsupported minimum TLS version '{}'",
                    other
                )))
            }
        };

        let mut builder = reqwest::Client::builder()
            .min_tls_version(min_tls)
            .tcp_nodelay(config.tcp_nodelay)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .user_agent(config.user_agent.clone());

        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }

        let client = builder.build()?;

        tracing::info!(
            min_tls_version = %config.min_tls_version,
            tcp_nodelay = config.tcp_nodelay,
            "HTTP client initialized"
        );

        Ok(Self { client })
    }

    /// Wrap an already-built client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &RestRequest) -> Result<RestResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RestResponse {
            status,
            headers,
            body,
        })
    }
}
