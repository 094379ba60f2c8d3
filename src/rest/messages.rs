//! Request payloads for the remote service.
//!
//! These are opaque to the transport; they only fix the JSON field names
//! the service expects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnRequest {
    pub data: AuthnRequestData,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthnRequestData {
    #[serde(rename = "CLIENT_APP_ID")]
    pub client_app_id: String,

    #[serde(rename = "CLIENT_APP_VERSION")]
    pub client_app_version: String,

    #[serde(rename = "ACCOUNT_NAME", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    #[serde(rename = "LOGIN_NAME")]
    pub login_name: String,

    #[serde(rename = "PASSWORD")]
    pub password: String,

    #[serde(rename = "CLIENT_ENVIRONMENT")]
    pub client_env: AuthnRequestClientEnv,
}

// Never print the password.
impl fmt::Debug for AuthnRequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthnRequestData")
            .field("client_app_version", &self.client_app_version)
            .field("account_name", &self.account_name)
            .field("login_name", &self.login_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnRequestClientEnv {
    #[serde(rename = "APPLICATION")]
    pub application: String,

    #[serde(rename = "OS_VERSION")]
    pub os_version: String,
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
}

/// Query submission body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub sql_text: String,
    pub describe_only: bool,
    #[serde(rename = "bindings", skip_serializing_if = "Option::is_none")]
    pub parameter_bindings: Option<HashMap<String, Binding>>,
}

/// Query cancellation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCancelRequest {
    pub request_id: String,
}

/// Session renewal body.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewSessionRequest {
    pub old_session_token: String,
    pub request_type: String,
}

impl fmt::Debug for RenewSessionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenewSessionRequest")
            .field("request_type", &self.request_type)
            .finish_non_exhaustive()
    }
}
