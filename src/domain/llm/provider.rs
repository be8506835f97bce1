use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::{Completion, CompletionRequest};
use crate::domain::routing::Backend;
use crate::domain::DomainError;

/// Generation parameters a backend uses when the caller does not override them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Adapter for one LLM backend (OpenAI, Anthropic).
///
/// Implementations issue exactly one call per `complete` and hand any
/// transport or API error back unchanged; retry and fallback live in the
/// router.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a single completion request
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, DomainError>;

    /// Which backend this adapter talks to
    fn backend(&self) -> Backend;

    /// Model name sent to the backend
    fn model(&self) -> &str;

    /// Generation defaults for this backend
    fn defaults(&self) -> GenerationDefaults {
        self.backend().default_generation()
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    pub struct MockLlmProvider {
        backend: Backend,
        response: Option<String>,
        error: Option<String>,
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmProvider {
        pub fn new(backend: Backend) -> Self {
            Self {
                backend,
                response: None,
                error: None,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(mut self, content: impl Into<String>) -> Self {
            self.response = Some(content.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<CompletionRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.backend.as_str(), error));
            }

            self.response
                .clone()
                .map(|content| Completion::new(content, self.model()))
                .ok_or_else(|| {
                    DomainError::provider(self.backend.as_str(), "No mock response configured")
                })
        }

        fn backend(&self) -> Backend {
            self.backend
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }
}
