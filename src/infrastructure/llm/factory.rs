use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::http_client::HttpClient;
use super::{AnthropicProvider, OpenAiProvider, UnconfiguredProvider};
use crate::config::BackendConfig;
use crate::domain::{Backend, DomainError, GenerationDefaults, LlmProvider};

/// Factory for creating LLM backend adapters
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the adapter for `backend` from its configuration section.
    ///
    /// The API key comes from the config section, or else from `env_key`
    /// (see `env_api_key`). A backend without any key gets an
    /// `UnconfiguredProvider`, so requests preferring it fall back to the
    /// other backend.
    pub fn create(
        backend: Backend,
        config: &BackendConfig,
        env_key: Option<String>,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let defaults = resolve_defaults(backend, config);
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| backend.default_model().to_string());

        let api_key = match resolve_api_key(backend, config, env_key) {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    backend = %backend,
                    error = %e,
                    "LLM backend has no API key, its calls will fail over"
                );
                return Ok(Arc::new(UnconfiguredProvider::new(
                    backend,
                    model,
                    defaults,
                    e.to_string(),
                )));
            }
        };

        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

        let provider: Arc<dyn LlmProvider> = match backend {
            Backend::OpenAi => {
                let provider = match &config.base_url {
                    Some(base_url) => OpenAiProvider::with_base_url(http_client, api_key, base_url),
                    None => OpenAiProvider::new(http_client, api_key),
                };
                Arc::new(provider.with_model(model).with_defaults(defaults))
            }
            Backend::Anthropic => {
                let provider = match &config.base_url {
                    Some(base_url) => {
                        AnthropicProvider::with_base_url(http_client, api_key, base_url)
                    }
                    None => AnthropicProvider::new(http_client, api_key),
                };
                Arc::new(provider.with_model(model).with_defaults(defaults))
            }
        };

        info!(
            backend = %backend,
            model = %provider.model(),
            timeout_secs = config.timeout_secs,
            "LLM backend configured"
        );

        Ok(provider)
    }

    /// Whether `backend` has a usable API key from config or `env_key`
    pub fn has_api_key(backend: Backend, config: &BackendConfig, env_key: Option<String>) -> bool {
        resolve_api_key(backend, config, env_key).is_ok()
    }

    /// The backend's API key from its conventional environment variable
    pub fn env_api_key(backend: Backend) -> Option<String> {
        std::env::var(api_key_env_var(backend)).ok()
    }
}

fn api_key_env_var(backend: Backend) -> &'static str {
    match backend {
        Backend::OpenAi => "OPENAI_API_KEY",
        Backend::Anthropic => "ANTHROPIC_API_KEY",
    }
}

fn resolve_api_key(
    backend: Backend,
    config: &BackendConfig,
    env_key: Option<String>,
) -> Result<String, DomainError> {
    let non_blank = |key: &String| !key.trim().is_empty();

    config
        .api_key
        .clone()
        .filter(non_blank)
        .or(env_key.filter(non_blank))
        .ok_or_else(|| {
            DomainError::configuration(format!(
                "No API key for backend '{}': set backends.{}.api_key or {}",
                backend,
                backend,
                api_key_env_var(backend)
            ))
        })
}

fn resolve_defaults(backend: Backend, config: &BackendConfig) -> GenerationDefaults {
    let family = backend.default_generation();

    GenerationDefaults {
        max_tokens: config.max_tokens.unwrap_or(family.max_tokens),
        temperature: config.temperature.unwrap_or(family.temperature),
    }
}
