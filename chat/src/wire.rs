//! JSON bodies exchanged between the chat client, the serverless functions,
//! and the upstream webhook.
//!
//! Field names follow the browser contract (`userId`, not `user_id`), so the
//! same types serve both sides of the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::message::Source;

/// Status marker carried by every function response.
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Body of a direct webhook call: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub message: String,
}

/// Body forwarded by the `chat-webhook` proxy function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxiedWebhookRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// RFC 3339 instant at which the proxy forwarded the message.
    pub timestamp: String,
}

/// Request accepted by every serverless function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Successful function response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSuccess {
    pub response: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default = "success_status")]
    pub status: String,
}

impl FunctionSuccess {
    #[must_use]
    pub fn new(response: String, sources: Vec<Source>) -> Self {
        Self { response, sources, status: STATUS_SUCCESS.to_string() }
    }
}

/// Error payload returned with HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFailure {
    pub error: String,
    pub details: String,
    pub status: String,
}

impl FunctionFailure {
    #[must_use]
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self { error: error.into(), details: details.into(), status: STATUS_ERROR.to_string() }
    }
}

fn success_status() -> String {
    STATUS_SUCCESS.to_string()
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
