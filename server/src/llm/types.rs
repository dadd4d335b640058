//! LLM types — errors, generation settings, and the generation trait.

use serde::Serialize;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// GENERATION SETTINGS
// =============================================================================

/// Sampling parameters sent with every request (`generationConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 2048 }
    }
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Single-prompt text generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send one prompt and return the first candidate's text.
    ///
    /// `Ok(None)` means the provider answered but produced no text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}
