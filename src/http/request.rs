//! Request envelopes.
//!
//! # Responsibilities
//! - Generate a unique request ID per logical call
//! - Describe one logical call: target, payload, credentials, both timeouts
//! - Turn result-chunk downloads into plain GET envelopes
//!
//! # Design Decisions
//! - Envelopes are immutable once handed to the client; every attempt
//!   rebuilds its HTTP request from the same envelope
//! - The body is opaque bytes; JSON encoding happens at construction

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::TimeoutConfig;
use crate::error::{RestError, TransportError};

/// Default per-attempt timeout for REST calls.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(16);

pub const SSE_C_ALGORITHM: &str = "x-amz-server-side-encryption-customer-algorithm";
pub const SSE_C_KEY: &str = "x-amz-server-side-encryption-customer-key";
pub const SSE_C_AES: &str = "AES256";

/// Timeout pair stamped on new envelopes. `None` = no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    /// Whole-call timeout spanning every retry.
    pub rest: Option<Duration>,
    /// Timeout of each HTTP round-trip.
    pub http: Option<Duration>,
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self {
            rest: None,
            http: Some(DEFAULT_HTTP_TIMEOUT),
        }
    }
}

impl From<&TimeoutConfig> for RequestTimeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            rest: config.rest_timeout(),
            http: config.http_timeout(),
        }
    }
}

/// Unique identifier for one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable description of one logical REST call.
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub request_id: RequestId,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Whole-call timeout spanning every retry. `None` = no limit.
    pub rest_timeout: Option<Duration>,
    /// Timeout of each HTTP round-trip. `None` = no limit.
    pub http_timeout: Option<Duration>,
}

impl RestRequest {
    fn new(method: Method, url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            request_id: RequestId::new(),
            method,
            url,
            headers,
            body: None,
            rest_timeout: None,
            http_timeout: Some(DEFAULT_HTTP_TIMEOUT),
        }
    }

    /// Replace both timeouts at once.
    pub fn with_timeouts(self, timeouts: RequestTimeouts) -> Self {
        self.with_rest_timeout(timeouts.rest).with_http_timeout(timeouts.http)
    }

    /// A GET call with no body.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// A POST call whose body is `payload` encoded as JSON.
    pub fn post<T: Serialize + ?Sized>(url: Url, payload: &T) -> Result<Self, RestError> {
        let body = serde_json::to_vec(payload).map_err(RestError::Encode)?;
        let mut request = Self::new(Method::POST, url);
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request.body = Some(Bytes::from(body));
        Ok(request)
    }

    /// Set the `Authorization` header to `token` verbatim.
    ///
    /// The value is marked sensitive and never shows up in `Debug` output.
    pub fn with_authorization(mut self, token: &str) -> Result<Self, TransportError> {
        let (name, value) = parse_header(AUTHORIZATION.as_str(), token)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, TransportError> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn with_rest_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.rest_timeout = timeout;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }
}

impl fmt::Display for RestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RestRequest {{id: {}, {} {}", self.request_id, self.method, self.url)?;
        if let Some(body) = &self.body {
            write!(f, ", body: {} bytes", body.len())?;
        }
        write!(f, "}}")
    }
}

/// Download of one result chunk from cloud storage.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: Url,
    /// Query result master key, sent as an SSE-C key when no chunk headers are given.
    pub qrmk: Option<String>,
    /// Headers supplied by the service for this chunk; sent verbatim.
    pub chunk_headers: HashMap<String, String>,
    pub rest_timeout: Option<Duration>,
    pub http_timeout: Option<Duration>,
}

impl DownloadRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            qrmk: None,
            chunk_headers: HashMap::new(),
            rest_timeout: None,
            http_timeout: Some(DEFAULT_HTTP_TIMEOUT),
        }
    }

    pub fn with_timeouts(mut self, timeouts: RequestTimeouts) -> Self {
        self.rest_timeout = timeouts.rest;
        self.http_timeout = timeouts.http;
        self
    }

    /// Build the GET envelope that fetches this chunk.
    pub fn into_rest_request(self) -> Result<RestRequest, TransportError> {
        let mut request = RestRequest::new(Method::GET, self.url)
            .with_rest_timeout(self.rest_timeout)
            .with_http_timeout(self.http_timeout);
        // Chunks are binary, not JSON.
        request.headers.remove(ACCEPT);

        if !self.chunk_headers.is_empty() {
            for (name, value) in &self.chunk_headers {
                let (name, value) = parse_header(name, value)?;
                request.headers.insert(name, value);
            }
        } else if let Some(qrmk) = &self.qrmk {
            let (alg_name, alg_value) = parse_header(SSE_C_ALGORITHM, SSE_C_AES)?;
            let (key_name, key_value) = parse_header(SSE_C_KEY, qrmk)?;
            request.headers.insert(alg_name, alg_value);
            request.headers.insert(key_name, key_value);
        }

        Ok(request)
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TransportError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError::InvalidRequest(format!("header name '{}': {}", name, e)))?;
    let mut header_value = HeaderValue::from_str(value)
        .map_err(|e| TransportError::InvalidRequest(format!("header '{}': {}", name, e)))?;
    if header_name == AUTHORIZATION || name.eq_ignore_ascii_case(SSE_C_KEY) {
        header_value.set_sensitive(true);
    }
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://account.example.com").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_rest_request_defaults() {
        let request = RestRequest::get(url("/session"));
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.rest_timeout, None);
        assert_eq!(request.http_timeout, Some(DEFAULT_HTTP_TIMEOUT));
        assert!(request.body.is_none());
        assert_eq!(request.headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_post_encodes_json() {
        let payload = serde_json::json!({"sqlText": "select 1"});
        let request = RestRequest::post(url("/queries/v1/query-request"), &payload)
            .unwrap()
            .with_authorization("Token=\"abc\"")
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.as_deref(), Some(&br#"{"sqlText":"select 1"}"#[..]));
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert!(request.headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_authorization_hidden_from_debug() {
        let request = RestRequest::get(url("/session"))
            .with_authorization("Snowflake Token=\"s3cr3t\"")
            .unwrap();

        assert!(request.headers[AUTHORIZATION].is_sensitive());
        assert!(!format!("{:?}", request).contains("s3cr3t"));
        assert!(!format!("{:?}", request.headers).contains("s3cr3t"));
    }

    #[test]
    fn test_invalid_authorization_rejected() {
        let err = RestRequest::get(url("/")).with_authorization("line\nbreak").unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn test_unique_request_ids() {
        let a = RestRequest::get(url("/"));
        let b = RestRequest::get(url("/"));
        assert_ne!(a.request_id, b.request_id);
        assert!(a.to_string().contains(&a.request_id.to_string()));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = RestRequest::get(url("/")).with_header("bad header", "x").unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn test_download_uses_qrmk_without_chunk_headers() {
        let mut download = DownloadRequest::new(url("/chunk-0"));
        download.qrmk = Some("bWFzdGVyLWtleQ==".into());

        let request = download.into_rest_request().unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.headers[SSE_C_ALGORITHM], SSE_C_AES);
        assert_eq!(request.headers[SSE_C_KEY], "bWFzdGVyLWtleQ==");
        assert!(request.headers.get(ACCEPT).is_none());
    }

    #[test]
    fn test_download_prefers_chunk_headers() {
        let mut download = DownloadRequest::new(url("/chunk-1"));
        download.qrmk = Some("ignored".into());
        download
            .chunk_headers
            .insert("x-custom-chunk".into(), "value".into());
        download.rest_timeout = Some(Duration::from_secs(60));

        let request = download.into_rest_request().unwrap();
        assert_eq!(request.headers["x-custom-chunk"], "value");
        assert!(request.headers.get(SSE_C_KEY).is_none());
        assert_eq!(request.rest_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_timeouts_from_config() {
        let config = TimeoutConfig {
            rest_timeout_secs: 300,
            http_timeout_secs: 0,
        };
        let timeouts = RequestTimeouts::from(&config);

        let request = RestRequest::get(url("/session")).with_timeouts(timeouts);
        assert_eq!(request.rest_timeout, Some(Duration::from_secs(300)));
        assert_eq!(request.http_timeout, None);

        let chunk = DownloadRequest::new(url("/chunk-2")).with_timeouts(timeouts);
        assert_eq!(chunk.rest_timeout, Some(Duration::from_secs(300)));
        assert_eq!(chunk.http_timeout, None);
    }
}
