use std::sync::Arc;

use crate::domain::ModelRouter;

/// Shared state for all HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Arc<ModelRouter>,
    /// Used when a chat request carries no system prompt
    pub default_system_prompt: Arc<str>,
}

impl AppState {
    pub fn new(router: ModelRouter, default_system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            router: Arc::new(router),
            default_system_prompt: default_system_prompt.into(),
        }
    }
}
