//! LLM backend domain models and traits

mod message;
mod provider;
mod request;
mod response;

pub use message::{ChatMessage, MessageRole};
pub use provider::{GenerationDefaults, LlmProvider};
pub use request::CompletionRequest;
pub use response::{Completion, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
#[cfg(test)]
pub use request::CompletionRequestBuilder;
