use thiserror::Error;

use super::routing::Backend;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("HTTP error: {message}")]
    Http { status: Option<u16>, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Both the preferred and the fallback backend failed for one request
    #[error(
        "All backends failed: {preferred} error: {preferred_error}; {fallback} error: {fallback_error}"
    )]
    FallbackFailed {
        preferred: Backend,
        preferred_error: Box<DomainError>,
        fallback: Backend,
        fallback_error: Box<DomainError>,
    },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn http(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn fallback_failed(
        preferred: Backend,
        preferred_error: DomainError,
        fallback: Backend,
        fallback_error: DomainError,
    ) -> Self {
        Self::FallbackFailed {
            preferred,
            preferred_error: Box::new(preferred_error),
            fallback,
            fallback_error: Box::new(fallback_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_http_error_keeps_status() {
        let error = DomainError::http(Some(429), "HTTP 429 Too Many Requests: slow down");

        match error {
            DomainError::Http { status, .. } => assert_eq!(status, Some(429)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fallback_failed_names_both_backends() {
        let error = DomainError::fallback_failed(
            Backend::Anthropic,
            DomainError::http(Some(529), "overloaded"),
            Backend::OpenAi,
            DomainError::provider("openai", "quota exceeded"),
        );

        let message = error.to_string();
        assert!(message.contains("anthropic error: HTTP error: overloaded"));
        assert!(message.contains("openai error: Provider error: openai - quota exceeded"));
    }
}
