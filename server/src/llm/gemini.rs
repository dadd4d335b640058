//! Google Generative Language API client (`models/{model}:generateContent`).
//!
//! Thin HTTP wrapper. Pure parsing in `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{GenerationConfig, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            generation: config.generation,
        })
    }

    pub async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, LlmError> {
        let body = build_request(prompt, self.generation);
        let response = self
            .http
            .post(endpoint(&self.base_url, model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

fn endpoint(base_url: &str, model: &str) -> String {
    format!("{base_url}/models/{model}:generateContent")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

fn build_request(prompt: &str, generation: GenerationConfig) -> ApiRequest<'_> {
    ApiRequest { contents: [RequestContent { parts: [RequestPart { text: prompt }] }], generation_config: generation }
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Extract `candidates[0].content.parts[0].text`.
///
/// Missing or empty text yields `Ok(None)`; only malformed JSON is an error.
pub(crate) fn parse_response(json: &str) -> Result<Option<String>, LlmError> {
    let resp: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let text = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty());
    Ok(text)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
