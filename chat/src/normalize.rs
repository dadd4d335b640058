//! Webhook response normalization.
//!
//! Webhook bodies are free-form. Decoding runs in two stages: first try the
//! known JSON shapes (`[{"output": ...}]` or `{"output": ...}`), then fall back
//! to the raw body. Both stages are total, so a malformed success body can
//! never fail a request.

use serde_json::Value;

/// Outcome of decoding a webhook body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookReply {
    /// The body matched a known shape; holds the `output` value.
    Structured(String),
    /// The body was not JSON or had no usable `output`; holds it verbatim.
    RawText(String),
}

impl WebhookReply {
    #[must_use]
    pub fn into_content(self) -> String {
        match self {
            Self::Structured(text) | Self::RawText(text) => text,
        }
    }
}

/// Decode a webhook response body into reply content.
#[must_use]
pub fn decode_webhook_body(body: &str) -> WebhookReply {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match extract_output(&value) {
            Some(output) => WebhookReply::Structured(output),
            None => WebhookReply::RawText(body.to_string()),
        },
        Err(_) => WebhookReply::RawText(body.to_string()),
    }
}

fn extract_output(value: &Value) -> Option<String> {
    let output = match value {
        Value::Array(items) => items.first()?.get("output")?,
        Value::Object(map) => map.get("output")?,
        _ => return None,
    };
    match output {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
