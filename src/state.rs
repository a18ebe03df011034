//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the chat store handle and the optional LLM client. Clone is
//! required by Axum; both fields are Arc-backed.

use std::sync::Arc;

use crate::llm::LlmGenerate;
use crate::services::chat::ChatStore;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: ChatStore,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmGenerate>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: ChatStore, llm: Option<Arc<dyn LlmGenerate>>) -> Self {
        Self { store, llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
