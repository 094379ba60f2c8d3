//! REST client subsystem.
//!
//! # Data Flow
//! ```text
//! messages.rs (login / query / cancel / renew payloads)
//!     → RestRequest::post(url, &payload)
//!     → client.rs RestClient::execute (retry loop over the shared transport)
//!     → RestResponse → caller decodes
//! ```

pub mod client;
pub mod messages;

pub use client::RestClient;
pub use messages::{AuthnRequest, QueryCancelRequest, QueryRequest, RenewSessionRequest};
