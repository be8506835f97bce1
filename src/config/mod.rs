//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, BackendsConfig, LogFormat, LoggingConfig, MetricsConfig,
    RoutingConfig, ServerConfig,
};
