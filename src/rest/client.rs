//! REST client facade.
//!
//! # Responsibilities
//! - Own the shared transport and the retry policy
//! - Build envelopes carrying the configured default timeouts
//! - Execute envelopes through the retry loop
//! - Decode JSON bodies and fetch result chunks

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::TransportConfig;
use crate::error::{RestError, RestResult, TransportError};
use crate::http::client::{HttpTransport, Transport};
use crate::http::request::{DownloadRequest, RequestTimeouts, RestRequest};
use crate::http::response::RestResponse;
use crate::lifecycle::cancel::CancelToken;
use crate::resilience::backoff::BackoffPolicy;
use crate::resilience::retries::{self, RetryPolicy};

/// Client for REST calls against the remote service.
///
/// Cheap to clone; clones share one transport. Safe to use from many tasks
/// at once.
pub struct RestClient<T = HttpTransport> {
    transport: Arc<T>,
    policy: RetryPolicy,
    timeouts: RequestTimeouts,
}

impl<T> Clone for RestClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            policy: self.policy,
            timeouts: self.timeouts,
        }
    }
}

impl RestClient<HttpTransport> {
    /// Build the shared HTTP client and retry policy from configuration.
    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::from_config(&config.http)?;
        let policy = RetryPolicy {
            backoff: BackoffPolicy::from(&config.backoff),
            record_metrics: config.observability.metrics_enabled,
        };
        Ok(Self::new(transport, policy).with_timeouts(RequestTimeouts::from(&config.timeouts)))
    }
}

impl<T: Transport> RestClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_shared(Arc::new(transport), policy)
    }

    /// Use a transport that is already shared elsewhere.
    pub fn with_shared(transport: Arc<T>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            timeouts: RequestTimeouts::default(),
        }
    }

    /// Set the timeouts stamped on envelopes built by this client.
    pub fn with_timeouts(mut self, timeouts: RequestTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn timeouts(&self) -> RequestTimeouts {
        self.timeouts
    }

    /// A GET envelope with this client's default timeouts.
    pub fn get(&self, url: Url) -> RestRequest {
        RestRequest::get(url).with_timeouts(self.timeouts)
    }

    /// A JSON POST envelope with this client's default timeouts.
    pub fn post<P: Serialize + ?Sized>(&self, url: Url, payload: &P) -> RestResult<RestRequest> {
        Ok(RestRequest::post(url, payload)?.with_timeouts(self.timeouts))
    }

    /// A chunk download with this client's default timeouts.
    pub fn download_request(&self, url: Url) -> DownloadRequest {
        DownloadRequest::new(url).with_timeouts(self.timeouts)
    }

    /// Run `request` to a terminal state.
    pub async fn execute(
        &self,
        request: &RestRequest,
        cancel: &CancelToken,
    ) -> RestResult<RestResponse> {
        retries::execute(self.transport.as_ref(), &self.policy, request, cancel).await
    }

    /// Run `request` and decode the response body as JSON.
    pub async fn execute_json<R: DeserializeOwned>(
        &self,
        request: &RestRequest,
        cancel: &CancelToken,
    ) -> RestResult<R> {
        self.execute(request, cancel).await?.json()
    }

    /// Fetch one result chunk. The body is returned undecoded.
    pub async fn download(
        &self,
        request: DownloadRequest,
        cancel: &CancelToken,
    ) -> RestResult<RestResponse> {
        let request = request.into_rest_request().map_err(RestError::Transport)?;
        self.execute(&request, cancel).await
    }
}

impl<T> std::fmt::Debug for RestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("backoff", &self.policy.backoff)
            .field("record_metrics", &self.policy.record_metrics)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}
