//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Caller
//!     → request.rs (envelope: url, body, auth, timeouts, request ID)
//!     → [resilience layer derives the attempt deadline]
//!     → client.rs (one round-trip on the shared reqwest client)
//!     → response.rs (status, headers, fully-read body)
//! ```

pub mod client;
pub mod request;
pub mod response;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpTransport, Transport};
pub use request::{DownloadRequest, RequestId, RequestTimeouts, RestRequest};
pub use response::RestResponse;
