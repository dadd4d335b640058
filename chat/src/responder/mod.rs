//! Responder gateway — one `send` contract over interchangeable backends.
//!
//! DESIGN
//! ======
//! `ResponderClient` is chosen once, from [`ResponderConfig`], and dispatches
//! to the echo, webhook, or serverless function strategy. Callers only see
//! the [`Responder`] trait, so tests and alternative front ends can swap in
//! their own implementation.

pub mod config;
pub mod echo;
pub mod function;
pub mod types;
pub mod webhook;

use config::{ResponderConfig, ResponderKind};
pub use types::{Reply, RequestContext, Responder, ResponderError};

/// Shown when the webhook cannot be reached or rejects the request.
pub const WEBHOOK_FAILURE_MESSAGE: &str =
    "Desculpe, não foi possível conectar ao serviço de atendimento. Tente novamente em instantes.";
/// Shown when the serverless function fails.
pub const FUNCTION_FAILURE_MESSAGE: &str = "Desculpe, ocorreu um erro ao processar sua mensagem. Tente novamente.";
/// The echo responder cannot fail; kept so every variant has a failure text.
pub const ECHO_FAILURE_MESSAGE: &str = "Desculpe, não foi possível gerar uma resposta.";

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete responder selected by configuration.
pub struct ResponderClient {
    inner: ResponderProvider,
}

enum ResponderProvider {
    Echo(echo::EchoResponder),
    Webhook(webhook::WebhookResponder),
    Function(function::FunctionResponder),
}

impl ResponderClient {
    /// Build a responder from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, ResponderError> {
        Self::from_config(ResponderConfig::from_env()?)
    }

    /// Build a responder from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: ResponderConfig) -> Result<Self, ResponderError> {
        let inner = match config {
            ResponderConfig::Echo(echo) => ResponderProvider::Echo(echo::EchoResponder::new(echo)),
            ResponderConfig::Webhook(webhook) => ResponderProvider::Webhook(webhook::WebhookResponder::new(webhook)?),
            ResponderConfig::Function(function) => {
                ResponderProvider::Function(function::FunctionResponder::new(function)?)
            }
        };
        Ok(Self { inner })
    }

    #[must_use]
    pub fn kind(&self) -> ResponderKind {
        match &self.inner {
            ResponderProvider::Echo(_) => ResponderKind::Echo,
            ResponderProvider::Webhook(_) => ResponderKind::Webhook,
            ResponderProvider::Function(_) => ResponderKind::Function,
        }
    }

    /// Where requests go, for startup logging.
    #[must_use]
    pub fn target(&self) -> &str {
        match &self.inner {
            ResponderProvider::Echo(_) => "local",
            ResponderProvider::Webhook(c) => c.url(),
            ResponderProvider::Function(c) => c.endpoint(),
        }
    }
}

#[async_trait::async_trait]
impl Responder for ResponderClient {
    async fn send(&self, text: &str, context: &RequestContext) -> Result<Reply, ResponderError> {
        match &self.inner {
            ResponderProvider::Echo(c) => Ok(c.send(text).await),
            ResponderProvider::Webhook(c) => c.send(text).await,
            ResponderProvider::Function(c) => c.send(text, context).await,
        }
    }

    fn failure_message(&self) -> &'static str {
        match self.kind() {
            ResponderKind::Echo => ECHO_FAILURE_MESSAGE,
            ResponderKind::Webhook => WEBHOOK_FAILURE_MESSAGE,
            ResponderKind::Function => FUNCTION_FAILURE_MESSAGE,
        }
    }
}

/// Read a response body, treating any non-2xx status as failure.
async fn read_success_body(response: reqwest::Response) -> Result<String, ResponderError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ResponderError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ResponderError::Status { status: status.as_u16(), body: text });
    }
    Ok(text)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
