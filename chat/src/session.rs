//! Chat session controller: ties the conversation store to a responder.
//!
//! DESIGN
//! ======
//! `submit` does the synchronous part (append the user message, clear the
//! draft) under the store lock, then spawns one task per request. That task
//! appends exactly one assistant message: the reply, or the responder's fixed
//! failure text. Requests are not serialized; when sends overlap, replies land
//! in completion order.

use std::sync::{Arc, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::conversation::{Conversation, SharedConversation, Submission};
use crate::gate::Session;
use crate::message::Message;
use crate::responder::{RequestContext, Responder};

pub struct ChatSession {
    conversation: SharedConversation,
    responder: Arc<dyn Responder>,
    context: RequestContext,
}

impl ChatSession {
    /// Open a chat view. Requires an authenticated [`Session`].
    #[must_use]
    pub fn new(_session: &Session, responder: Arc<dyn Responder>, context: RequestContext) -> Self {
        Self { conversation: Conversation::shared(), responder, context }
    }

    #[must_use]
    pub fn conversation(&self) -> &SharedConversation {
        &self.conversation
    }

    /// Copy of the current message sequence, for rendering.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.conversation).messages().to_vec()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        lock(&self.conversation).set_draft(text);
    }

    /// Submit user text. Returns `None` when the text is blank; otherwise the
    /// handle of the task that will append the assistant reply.
    ///
    /// Must be called within a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let submission = lock(&self.conversation).submit_user_text(text)?;
        Some(self.dispatch(submission))
    }

    /// Submit the current draft.
    pub fn submit_draft(&self) -> Option<JoinHandle<()>> {
        let submission = lock(&self.conversation).submit_draft()?;
        Some(self.dispatch(submission))
    }

    fn dispatch(&self, submission: Submission) -> JoinHandle<()> {
        info!(message_id = %submission.message_id, len = submission.text.len(), "chat: submitted");
        let conversation = Arc::clone(&self.conversation);
        let responder = Arc::clone(&self.responder);
        let context = self.context.clone();
        tokio::spawn(async move { deliver(conversation, responder, context, submission).await })
    }
}

async fn deliver(
    conversation: SharedConversation,
    responder: Arc<dyn Responder>,
    context: RequestContext,
    submission: Submission,
) {
    let message = match responder.send(&submission.text, &context).await {
        Ok(reply) => {
            info!(message_id = %submission.message_id, sources = reply.sources.len(), "chat: reply received");
            Message::assistant(reply.content, reply.sources)
        }
        Err(e) => {
            warn!(message_id = %submission.message_id, error = %e, "chat: responder failed");
            Message::assistant(responder.failure_message(), Vec::new())
        }
    };
    lock(&conversation).append(message);
}

fn lock(conversation: &SharedConversation) -> MutexGuard<'_, Conversation> {
    conversation.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
