//! LLM — generative text adapter for the `chat-gemini` function.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `LlmClient` owns the provider
//! client and the model name; callers depend on the [`LlmGenerate`] trait so
//! tests can substitute a mock.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::LlmGenerate;
use types::LlmError;

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client configured by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(&config)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gemini-1.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.inner.generate(&self.model, prompt).await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
