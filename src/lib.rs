//! Resilient REST transport for a remote database service.
//!
//! Executes REST calls (login, query submission and cancellation, session
//! renewal, result-chunk download) with two independent timeout scopes: a
//! whole-call budget spanning every retry, and a deadline on each HTTP
//! round-trip. Retryable failures back off exponentially (1, 2, 4, 8, 16,
//! 16, ... units); caller cancellation always aborts.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rest;

pub use config::TransportConfig;
pub use error::{RestError, RestResult, TransportError};
pub use http::{DownloadRequest, HttpTransport, RestRequest, RestResponse, Transport};
pub use lifecycle::CancelToken;
pub use resilience::RetryPolicy;
pub use rest::RestClient;
