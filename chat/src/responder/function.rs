//! Serverless function responder (`chat-gemini`, `chat-webhook`, ...).

use super::config::FunctionConfig;
use super::types::{Reply, RequestContext, ResponderError};
use crate::wire::{FunctionRequest, FunctionSuccess};

pub struct FunctionResponder {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl FunctionResponder {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FunctionConfig) -> Result<Self, ResponderError> {
        let http = config.timeouts.client()?;
        let endpoint = config.endpoint();
        Ok(Self { http, endpoint, api_key: config.api_key })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Invoke the function with `{message, userId}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body that
    /// is not a `{response, sources}` object.
    pub async fn send(&self, text: &str, context: &RequestContext) -> Result<Reply, ResponderError> {
        let body = FunctionRequest { message: text.to_string(), user_id: context.user_id.clone() };
        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key).header("apikey", key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ResponderError::Request(e.to_string()))?;

        let raw = super::read_success_body(response).await?;
        let parsed: FunctionSuccess = serde_json::from_str(&raw).map_err(|e| ResponderError::Decode(e.to_string()))?;
        Ok(Reply { content: parsed.response, sources: parsed.sources })
    }
}
