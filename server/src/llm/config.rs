//! LLM configuration parsed from environment variables.

use super::types::{GenerationConfig, LlmError};

pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub generation: GenerationConfig,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - the API key, read from the env var named by `LLM_API_KEY_ENV`
    ///   (default `GOOGLE_API_KEY`)
    ///
    /// Optional:
    /// - `LLM_MODEL`: default `gemini-1.5-flash`
    /// - `LLM_BASE_URL`: default Generative Language API `v1beta` root
    /// - `LLM_TEMPERATURE`, `LLM_TOP_K`, `LLM_TOP_P`, `LLM_MAX_OUTPUT_TOKENS`
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a number is malformed.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a number is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|v| !v.trim().is_empty())
            .ok_or(LlmError::MissingApiKey { var: key_var })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("LLM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let defaults = GenerationConfig::default();
        let generation = GenerationConfig {
            temperature: parse_or(&lookup, "LLM_TEMPERATURE", defaults.temperature)?,
            top_k: parse_or(&lookup, "LLM_TOP_K", defaults.top_k)?,
            top_p: parse_or(&lookup, "LLM_TOP_P", defaults.top_p)?,
            max_output_tokens: parse_or(&lookup, "LLM_MAX_OUTPUT_TOKENS", defaults.max_output_tokens)?,
        };
        let timeouts = LlmTimeouts {
            request_secs: parse_or(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { api_key, model, base_url, generation, timeouts })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, LlmError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| LlmError::ConfigParse(format!("invalid {key}: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
