//! Client-side message-exchange pipeline for ChatBW.
//!
//! This crate owns the conversation model shared by every front end (the
//! terminal client today) and the wire types spoken with the serverless
//! functions hosted by `server`. A submission flows through the
//! [`Conversation`] store, out through a [`Responder`], and back into the
//! store as exactly one assistant [`Message`].

pub mod conversation;
pub mod gate;
pub mod message;
pub mod normalize;
pub mod responder;
pub mod session;
pub mod wire;

pub use conversation::{Conversation, SharedConversation, Submission};
pub use gate::{AccessGate, FileSessionStore, GateError, MemorySessionStore, Session, SessionContext, SessionStore, View};
pub use message::{Author, Message, MessageId, Source};
pub use responder::{Reply, RequestContext, Responder, ResponderClient, ResponderError};
pub use session::ChatSession;
