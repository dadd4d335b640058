//! Direct webhook responder.

use tracing::debug;

use super::config::WebhookConfig;
use super::types::{Reply, ResponderError};
use crate::normalize::{WebhookReply, decode_webhook_body};
use crate::wire::WebhookRequest;

pub struct WebhookResponder {
    http: reqwest::Client,
    url: String,
}

impl WebhookResponder {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: WebhookConfig) -> Result<Self, ResponderError> {
        let http = config.timeouts.client()?;
        Ok(Self { http, url: config.url })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{message}` and normalize whatever text comes back.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status. A 2xx body
    /// never fails: unknown shapes are returned as raw text.
    pub async fn send(&self, text: &str) -> Result<Reply, ResponderError> {
        let body = WebhookRequest { message: text.to_string() };
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ResponderError::Request(e.to_string()))?;

        let raw = super::read_success_body(response).await?;
        let reply = decode_webhook_body(&raw);
        let structured = matches!(reply, WebhookReply::Structured(_));
        debug!(url = %self.url, structured, "webhook: reply decoded");
        Ok(Reply::text(reply.into_content()))
    }
}
