//! Responder configuration parsed from environment variables.

use std::time::Duration;

use super::types::ResponderError;

pub const DEFAULT_ECHO_DELAY_MS: u64 = 1500;
pub const DEFAULT_FUNCTION_NAME: &str = "chat-gemini";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderKind {
    Echo,
    Webhook,
    Function,
}

impl ResponderKind {
    /// Parse a responder name; `None` selects the echo responder.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names.
    pub fn parse(raw: Option<&str>) -> Result<Self, ResponderError> {
        match raw.map(str::trim).unwrap_or("echo") {
            "echo" => Ok(Self::Echo),
            "webhook" => Ok(Self::Webhook),
            "function" => Ok(Self::Function),
            other => Err(ResponderError::ConfigParse(format!(
                "unknown CHATBW_RESPONDER: {other} (expected 'echo', 'webhook' or 'function')"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Webhook => "webhook",
            Self::Function => "function",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl HttpTimeouts {
    /// Build a `reqwest` client honoring these timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn client(self) -> Result<reqwest::Client, ResponderError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_secs))
            .connect_timeout(Duration::from_secs(self.connect_secs))
            .build()
            .map_err(|e| ResponderError::HttpClientBuild(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoConfig {
    pub delay: Duration,
    pub with_sources: bool,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self { delay: Duration::from_millis(DEFAULT_ECHO_DELAY_MS), with_sources: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub timeouts: HttpTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Base URL under which functions are mounted, e.g. `http://host/functions/v1`.
    pub base_url: String,
    pub name: String,
    /// Sent as both bearer token and `apikey` header when present.
    pub api_key: Option<String>,
    pub timeouts: HttpTimeouts,
}

impl FunctionConfig {
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.name)
    }
}

/// Which responder to build, with its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderConfig {
    Echo(EchoConfig),
    Webhook(WebhookConfig),
    Function(FunctionConfig),
}

impl ResponderConfig {
    /// Build typed responder config from environment variables.
    ///
    /// - `CHATBW_RESPONDER`: `echo` (default), `webhook` or `function`
    /// - `CHATBW_WEBHOOK_URL`: required for `webhook`
    /// - `CHATBW_FUNCTIONS_URL`: required for `function`
    /// - `CHATBW_FUNCTION_NAME`: default `chat-gemini`
    /// - `CHATBW_FUNCTION_KEY`: optional bearer/apikey credential
    /// - `CHATBW_ECHO_DELAY_MS`: default 1500
    /// - `CHATBW_ECHO_SOURCES`: default true
    /// - `CHATBW_REQUEST_TIMEOUT_SECS`: default 60
    /// - `CHATBW_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for unknown responder names or missing URLs.
    pub fn from_env() -> Result<Self, ResponderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ResponderConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown responder names or missing URLs.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResponderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = ResponderKind::parse(lookup("CHATBW_RESPONDER").as_deref())?;
        let timeouts = HttpTimeouts {
            request_secs: parse_or(&lookup, "CHATBW_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "CHATBW_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        match kind {
            ResponderKind::Echo => Ok(Self::Echo(EchoConfig {
                delay: Duration::from_millis(parse_or(&lookup, "CHATBW_ECHO_DELAY_MS", DEFAULT_ECHO_DELAY_MS)),
                with_sources: lookup("CHATBW_ECHO_SOURCES")
                    .as_deref()
                    .and_then(parse_bool)
                    .unwrap_or(true),
            })),
            ResponderKind::Webhook => {
                let url = required(&lookup, "CHATBW_WEBHOOK_URL")?;
                Ok(Self::Webhook(WebhookConfig { url, timeouts }))
            }
            ResponderKind::Function => {
                let base_url = required(&lookup, "CHATBW_FUNCTIONS_URL")?
                    .trim_end_matches('/')
                    .to_string();
                let name = lookup("CHATBW_FUNCTION_NAME")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string());
                let api_key = lookup("CHATBW_FUNCTION_KEY").filter(|v| !v.is_empty());
                Ok(Self::Function(FunctionConfig { base_url, name, api_key, timeouts }))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> ResponderKind {
        match self {
            Self::Echo(_) => ResponderKind::Echo,
            Self::Webhook(_) => ResponderKind::Webhook,
            Self::Function(_) => ResponderKind::Function,
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ResponderError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ResponderError::MissingSetting { var: key.into() })
}

fn parse_or<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
