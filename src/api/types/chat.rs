//! Request and response bodies for the chat and classify endpoints

use serde::{Deserialize, Serialize};

use crate::domain::{Backend, ChatMessage, ModelPreference, RoutingOptions};

/// POST /v1/chat body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Falls back to the configured default prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_backend: Option<Backend>,
}

impl ChatRequest {
    pub fn routing_options(&self) -> RoutingOptions {
        RoutingOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            force_backend: self.force_backend,
        }
    }
}

/// POST /v1/classify body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifyRequest {
    pub messages: Vec<ChatMessage>,
}

/// Request type and backend pair chosen for a conversation
pub type ClassifyResponse = ModelPreference;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    #[test]
    fn test_chat_request_minimal() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
        )
        .unwrap();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert!(request.system_prompt.is_none());
        assert_eq!(request.routing_options(), RoutingOptions::default());
    }

    #[test]
    fn test_chat_request_with_overrides() {
        let request: ChatRequest = serde_json::from_str(
            r#"{
                "messages": [{"role": "user", "content": "hi"}],
                "system_prompt": "Be brief",
                "max_tokens": 200,
                "temperature": 0.5,
                "force_backend": "openai"
            }"#,
        )
        .unwrap();

        let options = request.routing_options();
        assert_eq!(options.max_tokens, Some(200));
        assert_eq!(options.temperature, Some(0.5));
        assert_eq!(options.force_backend, Some(Backend::OpenAi));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result: Result<ChatRequest, _> = serde_json::from_str(
            r#"{"messages": [], "force_backend": "gemini"}"#,
        );
        assert!(result.is_err());
    }
}
