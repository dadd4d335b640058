//! Responder contract shared by every backend strategy.

use crate::message::Source;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while configuring or calling a responder.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// A setting required by the selected responder is not set.
    #[error("missing setting: env var {var} not set")]
    MissingSetting { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// A success body did not have the expected structure.
    #[error("response decode failed: {0}")]
    Decode(String),
}

// =============================================================================
// REQUEST / REPLY
// =============================================================================

/// Caller information sent alongside the user text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()) }
    }
}

/// Normalized responder answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub sources: Vec<Source>,
}

impl Reply {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: content.into(), sources: Vec::new() }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Converts user text into a reply.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Deliver `text` to the backend and return its normalized reply.
    async fn send(&self, text: &str, context: &RequestContext) -> Result<Reply, ResponderError>;

    /// Fixed user-facing text shown in place of a reply when `send` fails.
    fn failure_message(&self) -> &'static str;
}
