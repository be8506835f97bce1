//! LLM backend adapters

mod anthropic;
mod factory;
mod http_client;
mod openai;
mod unconfigured;

pub use anthropic::AnthropicProvider;
pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;
pub use unconfigured::UnconfiguredProvider;
