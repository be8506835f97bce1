//! JACC Assistant
//!
//! Routes merchant-services chat requests between two LLM backends:
//! - Keyword classification of the latest message into a request type
//! - A preference table mapping each request type to a preferred and a fallback backend
//! - One fallback attempt when the preferred backend fails

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use domain::{Backend, ModelRouter};
use infrastructure::llm::LlmProviderFactory;
use tracing::info;

/// Build the model router from configuration: both backend adapters plus the
/// preference table with any configured overrides applied.
///
/// A backend without an API key still gets an adapter whose calls fail, so
/// its requests fall back to the other backend. Fails when neither backend
/// has a key.
pub fn create_model_router(config: &AppConfig) -> anyhow::Result<ModelRouter> {
    build_model_router(config, LlmProviderFactory::env_api_key)
}

fn build_model_router(
    config: &AppConfig,
    env_key: impl Fn(Backend) -> Option<String>,
) -> anyhow::Result<ModelRouter> {
    let any_configured = Backend::ALL.into_iter().any(|backend| {
        LlmProviderFactory::has_api_key(backend, config.backends.get(backend), env_key(backend))
    });

    if !any_configured {
        anyhow::bail!(
            "No LLM backend has an API key: set OPENAI_API_KEY or ANTHROPIC_API_KEY \
             (or backends.<name>.api_key)"
        );
    }

    let openai = LlmProviderFactory::create(
        Backend::OpenAi,
        &config.backends.openai,
        env_key(Backend::OpenAi),
    )?;
    let anthropic = LlmProviderFactory::create(
        Backend::Anthropic,
        &config.backends.anthropic,
        env_key(Backend::Anthropic),
    )?;

    let preferences = config.routing.preference_table();

    for preference in preferences.entries() {
        info!(
            request_type = %preference.request_type,
            preferred = %preference.preferred,
            fallback = %preference.fallback,
            "Routing preference"
        );
    }

    Ok(ModelRouter::new(openai, anthropic)?.with_preferences(preferences))
}

/// Create the application state for the HTTP server
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let router = create_model_router(config)?;

    Ok(AppState::new(router, config.routing.system_prompt.as_str()))
}
