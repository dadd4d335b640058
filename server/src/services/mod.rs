//! Domain services used by the function routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own backend calls and retrieval so route handlers can stay
//! focused on protocol translation and error mapping.

pub mod documents;
pub mod rag;
pub mod webhook_proxy;
