//! Webhook proxy — forwards chat messages to an automation webhook.
//!
//! Backs the `chat-webhook` function. The upstream body is returned as text
//! without interpretation; clients normalize it.

use std::time::Duration;

use chat::wire::{FunctionRequest, ProxiedWebhookRequest};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

const DEFAULT_WEBHOOK_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("webhook URL not configured")]
    NotConfigured,
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Webhook request failed: {0}")]
    Request(String),
    #[error("Webhook request failed: {status}")]
    Status { status: u16, body: String },
}

pub struct WebhookProxy {
    http: reqwest::Client,
    url: String,
}

impl WebhookProxy {
    /// Build from `WEBHOOK_URL` and optional `WEBHOOK_REQUEST_TIMEOUT_SECS` /
    /// `WEBHOOK_CONNECT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `WEBHOOK_URL` is unset or the HTTP client fails.
    pub fn from_env() -> Result<Self, ProxyError> {
        let url = std::env::var("WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ProxyError::NotConfigured)?;
        let request_secs = env_parse_u64("WEBHOOK_REQUEST_TIMEOUT_SECS", DEFAULT_WEBHOOK_REQUEST_TIMEOUT_SECS);
        let connect_secs = env_parse_u64("WEBHOOK_CONNECT_TIMEOUT_SECS", DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS);
        Self::new(url, Duration::from_secs(request_secs), Duration::from_secs(connect_secs))
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: String, request_timeout: Duration, connect_timeout: Duration) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ProxyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{message, userId, timestamp}` upstream and return the raw body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn forward(&self, request: &FunctionRequest) -> Result<String, ProxyError> {
        info!(user_id = ?request.user_id, message_len = request.message.len(), "webhook: forwarding");
        let body = ProxiedWebhookRequest {
            message: request.message.clone(),
            user_id: request.user_id.clone(),
            timestamp: OffsetDateTime::now_utc().format(&Rfc3339)?,
        };
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProxyError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::Request(e.to_string()))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "webhook: upstream rejected request");
            return Err(ProxyError::Status { status: status.as_u16(), body: text });
        }
        info!(len = text.len(), "webhook: response received");
        Ok(text)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "webhook_proxy_test.rs"]
mod tests;
