use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Backend, DomainError, ModelPreferenceTable, RequestType};

const DEFAULT_SYSTEM_PROMPT: &str = "You are JACC, an assistant for merchant services sales \
agents. Answer questions about payment processing, rates, statements and merchant \
accounts clearly and accurately.";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendsConfig {
    #[serde(default)]
    pub openai: BackendConfig,
    #[serde(default)]
    pub anthropic: BackendConfig,
}

impl BackendsConfig {
    pub fn get(&self, backend: Backend) -> &BackendConfig {
        match backend {
            Backend::OpenAi => &self.openai,
            Backend::Anthropic => &self.anthropic,
        }
    }
}

/// Settings for one LLM backend; unset values fall back to the backend's
/// built-in defaults
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Preferred backend per request type; the fallback is the other backend
    #[serde(default)]
    pub preferred: HashMap<RequestType, Backend>,
}

impl RoutingConfig {
    pub fn preference_table(&self) -> ModelPreferenceTable {
        self.preferred
            .iter()
            .fold(ModelPreferenceTable::default(), |table, (request_type, backend)| {
                table.with_preferred(*request_type, *backend)
            })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            preferred: HashMap::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject values that would only fail later, at request time
    pub fn validate(&self) -> Result<(), DomainError> {
        for backend in Backend::ALL {
            let section = self.backends.get(backend);

            if section.timeout_secs == 0 {
                return Err(DomainError::configuration(format!(
                    "backends.{}.timeout_secs must be greater than zero",
                    backend
                )));
            }

            if let Some(temperature) = section.temperature {
                if !(0.0..=2.0).contains(&temperature) {
                    return Err(DomainError::configuration(format!(
                        "backends.{}.temperature must be between 0 and 2",
                        backend
                    )));
                }
            }
        }

        Ok(())
    }
}
