use serde::{Deserialize, Serialize};

use super::ChatMessage;

/// A single completion call as seen by a backend adapter.
///
/// The system prompt is kept apart from the conversation; each adapter places
/// it where its backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        messages: Vec<ChatMessage>,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            messages,
            system_prompt: system_prompt.into(),
            max_tokens,
            temperature,
        }
    }

    #[cfg(test)]
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::new()
    }
}

/// Builder for CompletionRequest in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CompletionRequestBuilder {
    messages: Vec<ChatMessage>,
    system_prompt: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[cfg(test)]
impl CompletionRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(ChatMessage::user(content))
    }

    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(ChatMessage::assistant(content))
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Unset limits default to 1024 tokens at temperature 0.7
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            messages: self.messages,
            system_prompt: self.system_prompt,
            max_tokens: self.max_tokens.unwrap_or(1024),
            temperature: self.temperature.unwrap_or(0.7),
        }
    }
}
