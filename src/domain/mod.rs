//! Domain layer - Core business logic and entities

pub mod error;
pub mod llm;
pub mod routing;

pub use error::DomainError;
pub use llm::{
    ChatMessage, Completion, CompletionRequest, GenerationDefaults, LlmProvider, MessageRole,
    Usage,
};
pub use routing::{
    Backend, KeywordClassifier, ModelPreference, ModelPreferenceTable, ModelRouter,
    RequestClassifier, RequestType, RoutingOptions, RoutingResult,
};
