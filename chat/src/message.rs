//! Conversation messages and source citations.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Greeting seeded at the head of every conversation.
pub const WELCOME_TEXT: &str = "Hello! I'm **ChatBW**, your internal company assistant. I'm here to help \
Level 1 support staff quickly find and follow documented procedures.\n\n\
**I can help you with:**\n\
• Troubleshooting steps and runbooks\n\
• Operational procedures and processes\n\
• Company policies and guidelines\n\
• Step-by-step technical documentation\n\n\
Just ask me any \"how-to\" question about our internal processes, and I'll search our knowledge base \
to provide you with the exact procedures you need.";

/// Opaque message identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// A provenance citation attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub path: String,
    pub excerpt: String,
}

impl Source {
    #[must_use]
    pub fn new(title: impl Into<String>, path: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self { title: title.into(), path: path.into(), excerpt: excerpt.into() }
    }
}

/// A single entry in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub author: Author,
    pub timestamp: OffsetDateTime,
    /// Citations; always empty for user messages.
    pub sources: Vec<Source>,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            author: Author::User,
            timestamp: OffsetDateTime::now_utc(),
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            author: Author::Assistant,
            timestamp: OffsetDateTime::now_utc(),
            sources,
        }
    }

    /// The synthetic assistant greeting that opens a conversation.
    #[must_use]
    pub fn welcome() -> Self {
        Self::assistant(WELCOME_TEXT, Vec::new())
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
