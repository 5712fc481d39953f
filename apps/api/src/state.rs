use std::sync::Arc;

use crate::knowledge::store::KnowledgeStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub knowledge: Arc<KnowledgeStore>,
    /// `None` when the completion credentials are not configured; the chat
    /// route maps absence to a configuration error.
    pub llm: Option<LlmClient>,
}
