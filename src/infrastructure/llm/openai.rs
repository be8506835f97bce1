use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    Backend, ChatMessage, Completion, CompletionRequest, DomainError, GenerationDefaults,
    LlmProvider, Usage,
};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat completions adapter
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    defaults: GenerationDefaults,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: Backend::OpenAi.default_model().to_string(),
            defaults: Backend::OpenAi.default_generation(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// The system prompt travels as the first message of the list
    fn build_request(&self, request: &CompletionRequest) -> serde_json::Value {
        let system = (!request.system_prompt.is_empty()).then(|| OpenAiMessage {
            role: "system",
            content: &request.system_prompt,
        });

        let messages: Vec<OpenAiMessage<'_>> = system
            .into_iter()
            .chain(request.messages.iter().map(OpenAiMessage::from_domain))
            .collect();

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Completion, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let model = response.model.unwrap_or_else(|| self.model.clone());
        let mut completion = Completion::new(content, model);

        if let Some(usage) = response.usage {
            completion =
                completion.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(completion)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(&request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn backend(&self) -> Backend {
        Backend::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn defaults(&self) -> GenerationDefaults {
        self.defaults
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> OpenAiMessage<'a> {
    fn from_domain(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn mock_response(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18 }
        })
    }

    #[tokio::test]
    async fn test_openai_complete() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, mock_response(serde_json::json!("Hello! How can I help?")));
        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = CompletionRequest::builder().user("Hello!").build();
        let completion = provider.complete(request).await.unwrap();

        assert_eq!(completion.content, "Hello! How can I help?");
        assert_eq!(completion.model, "gpt-4o-2024-08-06");

        let usage = completion.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 8);
    }

    #[tokio::test]
    async fn test_system_prompt_is_first_message() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, mock_response(serde_json::json!("ok")));
        let provider = OpenAiProvider::new(client, "test-api-key").with_model("gpt-4o-mini");

        let request = CompletionRequest::builder()
            .system_prompt("You are JACC")
            .user("Hi")
            .assistant("Hello")
            .user("What is a chargeback?")
            .max_tokens(300)
            .temperature(0.2)
            .build();
        provider.complete(request).await.unwrap();

        let sent = provider.client.last_request().unwrap();
        let body = &sent.body;
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 300);
        assert!(body.get("system").is_none());

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "You are JACC");
        assert_eq!(messages[3]["content"], "What is a chargeback?");

        assert_eq!(sent.header("Authorization"), Some("Bearer test-api-key"));
    }

    #[tokio::test]
    async fn test_empty_system_prompt_is_omitted() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, mock_response(serde_json::json!("ok")));
        let provider = OpenAiProvider::new(client, "key");

        let request = CompletionRequest::builder().user("Hi").build();
        provider.complete(request).await.unwrap();

        let body = provider.client.last_request().unwrap().body;
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_string() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, mock_response(serde_json::Value::Null));
        let provider = OpenAiProvider::new(client, "key");

        let request = CompletionRequest::builder().user("Hi").build();
        let completion = provider.complete(request).await.unwrap();

        assert_eq!(completion.content, "");
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_string() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({"id": "x", "choices": []}));
        let provider = OpenAiProvider::new(client, "key");

        let request = CompletionRequest::builder().user("Hi").build();
        let completion = provider.complete(request).await.unwrap();

        assert_eq!(completion.content, "");
        assert_eq!(completion.model, "gpt-4o");
        assert!(completion.usage.is_none());
    }

    #[tokio::test]
    async fn test_openai_error_is_propagated() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");
        let provider = OpenAiProvider::new(client, "invalid-key");

        let request = CompletionRequest::builder().user("Hello!").build();
        let err = provider.complete(request).await.unwrap_err();

        assert!(matches!(err, DomainError::Http { .. }));
        assert!(err.to_string().contains("API key invalid"));
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let client = MockHttpClient::new()
            .with_response(custom_url, mock_response(serde_json::json!("Custom response")));
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080/");

        let request = CompletionRequest::builder().user("Test").build();
        let completion = provider.complete(request).await.unwrap();

        assert_eq!(completion.content, "Custom response");
        assert_eq!(provider.client.last_request().unwrap().url, custom_url);
    }

    #[test]
    fn test_defaults_can_be_overridden() {
        let provider = OpenAiProvider::new(MockHttpClient::new(), "key").with_defaults(
            GenerationDefaults {
                max_tokens: 512,
                temperature: 0.0,
            },
        );

        assert_eq!(provider.backend(), Backend::OpenAi);
        assert_eq!(provider.defaults().max_tokens, 512);
    }
}
