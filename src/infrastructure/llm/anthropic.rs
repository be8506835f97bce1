use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    Backend, ChatMessage, Completion, CompletionRequest, DomainError, GenerationDefaults,
    LlmProvider, MessageRole, Usage,
};

const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages API adapter
#[derive(Debug)]
pub struct AnthropicProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    defaults: GenerationDefaults,
}

impl<C: HttpClientTrait> AnthropicProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
            model: Backend::Anthropic.default_model().to_string(),
            defaults: Backend::Anthropic.default_generation(),
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

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn build_request(&self, request: &CompletionRequest) -> serde_json::Value {
        let (system, messages) = split_system_messages(&request.system_prompt, &request.messages);

        let anthropic_messages: Vec<AnthropicMessage<'_>> = messages
            .into_iter()
            .map(AnthropicMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": anthropic_messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        if let Some(system_content) = system {
            body["system"] = serde_json::json!(system_content);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", ANTHROPIC_VERSION),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Completion, DomainError> {
        let response: AnthropicResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("anthropic", format!("Failed to parse response: {}", e))
        })?;

        let content = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let model = response.model.unwrap_or_else(|| self.model.clone());
        let mut completion = Completion::new(content, model);

        if let Some(usage) = response.usage {
            completion = completion.with_usage(Usage::new(usage.input_tokens, usage.output_tokens));
        }

        Ok(completion)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for AnthropicProvider<C> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, DomainError> {
        let url = self.messages_url();
        let body = self.build_request(&request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn backend(&self) -> Backend {
        Backend::Anthropic
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn defaults(&self) -> GenerationDefaults {
        self.defaults
    }
}

/// The messages API has no system role: the prompt and any system messages in
/// the conversation are joined into the top-level `system` field.
fn split_system_messages<'a>(
    system_prompt: &str,
    messages: &'a [ChatMessage],
) -> (Option<String>, Vec<&'a ChatMessage>) {
    let mut system_content = system_prompt.to_string();
    let mut other_messages = Vec::new();

    for msg in messages {
        if msg.role == MessageRole::System {
            if !system_content.is_empty() {
                system_content.push('\n');
            }

            system_content.push_str(&msg.content);
        } else {
            other_messages.push(msg);
        }
    }

    let system = if system_content.is_empty() {
        None
    } else {
        Some(system_content)
    };

    (system, other_messages)
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> AnthropicMessage<'a> {
    fn from_domain(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
