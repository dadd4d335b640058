//! Conversation store.
//!
//! DESIGN
//! ======
//! The store is an append-only message sequence plus the input draft. Only two
//! events mutate it: the user submits text, or a responder reply (or failure)
//! arrives. Every append bumps a revision counter published on a `watch`
//! channel so front ends re-render from [`Conversation::messages`] without
//! polling.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::message::{Message, MessageId};

/// Store shared between the submitting front end and in-flight reply tasks.
pub type SharedConversation = Arc<Mutex<Conversation>>;

/// Text accepted for delivery to the responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Id of the user message created for this submission.
    pub message_id: MessageId,
    pub text: String,
}

pub struct Conversation {
    messages: Vec<Message>,
    draft: String,
    revision: watch::Sender<u64>,
}

impl Conversation {
    /// Start a conversation seeded with the assistant welcome message.
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self { messages: vec![Message::welcome()], draft: String::new(), revision }
    }

    #[must_use]
    pub fn shared() -> SharedConversation {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Add a message to the tail and notify subscribers.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Accept user text for delivery.
    ///
    /// Whitespace-only text is ignored: nothing is appended and the draft is
    /// left as it was. Otherwise the user message is appended, the draft is
    /// cleared, and the returned [`Submission`] must be handed to a responder.
    pub fn submit_user_text(&mut self, text: &str) -> Option<Submission> {
        if text.trim().is_empty() {
            return None;
        }
        let message = Message::user(text);
        let submission = Submission { message_id: message.id, text: text.to_string() };
        self.draft.clear();
        self.append(message);
        Some(submission)
    }

    /// Submit whatever is currently in the draft.
    pub fn submit_draft(&mut self) -> Option<Submission> {
        let text = self.draft.clone();
        self.submit_user_text(&text)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Current revision; increments once per append.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receive a notification after every append.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
