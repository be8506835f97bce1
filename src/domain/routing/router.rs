//! Model router - classifies a conversation, calls the preferred backend and
//! falls back to the alternate backend once on failure

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{
    Backend, KeywordClassifier, ModelPreference, ModelPreferenceTable, RequestClassifier,
    RequestType,
};
use crate::domain::llm::{ChatMessage, Completion, CompletionRequest, LlmProvider, Usage};
use crate::domain::DomainError;

/// Per-call overrides for `ModelRouter::route`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Call only this backend: no classification, no fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_backend: Option<Backend>,
}

impl RoutingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn force_backend(mut self, backend: Backend) -> Self {
        self.force_backend = Some(backend);
        self
    }
}

/// Outcome of one routed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub content: String,
    pub used_backend: Backend,
    pub had_fallback: bool,
    /// Absent when the backend was forced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl RoutingResult {
    fn from_completion(
        completion: Completion,
        used_backend: Backend,
        had_fallback: bool,
        request_type: Option<RequestType>,
    ) -> Self {
        Self {
            content: completion.content,
            used_backend,
            had_fallback,
            request_type,
            model: completion.model,
            usage: completion.usage,
        }
    }
}

/// Routes chat requests across the two backends.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
pub struct ModelRouter {
    openai: Arc<dyn LlmProvider>,
    anthropic: Arc<dyn LlmProvider>,
    classifier: Arc<dyn RequestClassifier>,
    preferences: ModelPreferenceTable,
}

impl std::fmt::Debug for ModelRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRouter")
            .field("openai", &self.openai)
            .field("anthropic", &self.anthropic)
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl ModelRouter {
    /// Create a router with the keyword classifier and the default preference
    /// table. Each provider must report the backend it is registered as.
    pub fn new(
        openai: Arc<dyn LlmProvider>,
        anthropic: Arc<dyn LlmProvider>,
    ) -> Result<Self, DomainError> {
        for (expected, provider) in [(Backend::OpenAi, &openai), (Backend::Anthropic, &anthropic)] {
            if provider.backend() != expected {
                return Err(DomainError::configuration(format!(
                    "Provider registered as '{}' reports backend '{}'",
                    expected,
                    provider.backend()
                )));
            }
        }

        Ok(Self {
            openai,
            anthropic,
            classifier: Arc::new(KeywordClassifier::new()),
            preferences: ModelPreferenceTable::default(),
        })
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RequestClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_preferences(mut self, preferences: ModelPreferenceTable) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &ModelPreferenceTable {
        &self.preferences
    }

    pub fn provider(&self, backend: Backend) -> &Arc<dyn LlmProvider> {
        match backend {
            Backend::OpenAi => &self.openai,
            Backend::Anthropic => &self.anthropic,
        }
    }

    /// Classify a conversation and look up its backend pair without calling
    /// any backend
    pub fn plan(&self, messages: &[ChatMessage]) -> ModelPreference {
        let request_type = self.classifier.classify(messages);
        self.preferences.get(request_type)
    }

    /// Route one request: preferred backend first, then the fallback backend
    /// once. Fails only when both calls fail, or when a forced backend fails.
    pub async fn route(
        &self,
        messages: &[ChatMessage],
        system_prompt: &str,
        options: &RoutingOptions,
    ) -> Result<RoutingResult, DomainError> {
        if let Some(backend) = options.force_backend {
            return self.route_forced(backend, messages, system_prompt, options).await;
        }

        let preference = self.plan(messages);
        let request_type = preference.request_type;
        let request = self.build_request(preference.preferred, messages, system_prompt, options);

        info!(
            request_type = %request_type,
            preferred = %preference.preferred,
            fallback = %preference.fallback,
            "Routing chat request"
        );

        let preferred_error = match self.call(preference.preferred, request.clone()).await {
            Ok(completion) => {
                record_routed(request_type, preference.preferred, false);

                return Ok(RoutingResult::from_completion(
                    completion,
                    preference.preferred,
                    false,
                    Some(request_type),
                ));
            }
            Err(e) => e,
        };

        warn!(
            backend = %preference.preferred,
            error = %preferred_error,
            fallback = %preference.fallback,
            "Preferred backend failed, trying fallback"
        );

        match self.call(preference.fallback, request).await {
            Ok(completion) => {
                info!(
                    request_type = %request_type,
                    backend = %preference.fallback,
                    "Request served by fallback backend"
                );
                record_routed(request_type, preference.fallback, true);

                Ok(RoutingResult::from_completion(
                    completion,
                    preference.fallback,
                    true,
                    Some(request_type),
                ))
            }
            Err(fallback_error) => {
                error!(
                    preferred = %preference.preferred,
                    preferred_error = %preferred_error,
                    fallback = %preference.fallback,
                    fallback_error = %fallback_error,
                    "All backends failed"
                );
                counter!("jacc_routing_failures_total", "request_type" => request_type.as_str())
                    .increment(1);

                Err(DomainError::fallback_failed(
                    preference.preferred,
                    preferred_error,
                    preference.fallback,
                    fallback_error,
                ))
            }
        }
    }

    async fn route_forced(
        &self,
        backend: Backend,
        messages: &[ChatMessage],
        system_prompt: &str,
        options: &RoutingOptions,
    ) -> Result<RoutingResult, DomainError> {
        info!(backend = %backend, "Routing chat request to forced backend");

        let request = self.build_request(backend, messages, system_prompt, options);
        let completion = self.call(backend, request).await?;

        counter!(
            "jacc_routed_requests_total",
            "request_type" => "forced",
            "backend" => backend.as_str(),
            "fallback" => "false"
        )
        .increment(1);

        Ok(RoutingResult::from_completion(completion, backend, false, None))
    }

    /// Explicit overrides win, otherwise the given backend's defaults apply.
    /// The same request is reused for the fallback call.
    fn build_request(
        &self,
        backend: Backend,
        messages: &[ChatMessage],
        system_prompt: &str,
        options: &RoutingOptions,
    ) -> CompletionRequest {
        let defaults = self.provider(backend).defaults();

        CompletionRequest::new(
            messages.to_vec(),
            system_prompt,
            options.max_tokens.unwrap_or(defaults.max_tokens),
            options.temperature.unwrap_or(defaults.temperature),
        )
    }

    async fn call(
        &self,
        backend: Backend,
        request: CompletionRequest,
    ) -> Result<Completion, DomainError> {
        let start = Instant::now();
        let result = self.provider(backend).complete(request).await;
        let status = if result.is_ok() { "success" } else { "error" };

        counter!("jacc_backend_calls_total", "backend" => backend.as_str(), "status" => status)
            .increment(1);
        histogram!("jacc_backend_call_duration_seconds", "backend" => backend.as_str())
            .record(start.elapsed().as_secs_f64());

        result
    }
}

fn record_routed(request_type: RequestType, backend: Backend, had_fallback: bool) {
    counter!(
        "jacc_routed_requests_total",
        "request_type" => request_type.as_str(),
        "backend" => backend.as_str(),
        "fallback" => if had_fallback { "true" } else { "false" }
    )
    .increment(1);
}
