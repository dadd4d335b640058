//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the optional backends each function needs; a missing backend is
//! reported per request rather than failing startup, mirroring how the
//! functions behave when their credentials are absent.

use std::sync::Arc;

use crate::llm::LlmGenerate;
use crate::services::documents::DocumentStore;
use crate::services::webhook_proxy::WebhookProxy;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub llm: Option<Arc<dyn LlmGenerate>>,
    pub documents: Option<Arc<dyn DocumentStore>>,
    pub webhook: Option<Arc<WebhookProxy>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        llm: Option<Arc<dyn LlmGenerate>>,
        documents: Option<Arc<dyn DocumentStore>>,
        webhook: Option<Arc<WebhookProxy>>,
    ) -> Self {
        Self { llm, documents, webhook }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
