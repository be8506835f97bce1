use async_trait::async_trait;

use crate::domain::{
    Backend, Completion, CompletionRequest, DomainError, GenerationDefaults, LlmProvider,
};

/// Stands in for a backend that has no API key. Every call fails with a
/// configuration error, which the router treats like any other backend
/// failure and falls back from.
#[derive(Debug)]
pub struct UnconfiguredProvider {
    backend: Backend,
    model: String,
    defaults: GenerationDefaults,
    reason: String,
}

impl UnconfiguredProvider {
    pub fn new(
        backend: Backend,
        model: impl Into<String>,
        defaults: GenerationDefaults,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            defaults,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for UnconfiguredProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<Completion, DomainError> {
        Err(DomainError::configuration(self.reason.clone()))
    }

    fn backend(&self) -> Backend {
        self.backend
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn defaults(&self) -> GenerationDefaults {
        self.defaults
    }
}
