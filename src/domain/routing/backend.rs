use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::llm::GenerationDefaults;

/// The two supported LLM completion backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Short-form backend, favoured for arithmetic and logic
    OpenAi,
    /// Text-and-reasoning backend, favoured for conversation and documents
    Anthropic,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::OpenAi, Backend::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// The alternate backend
    pub fn other(&self) -> Backend {
        match self {
            Self::OpenAi => Self::Anthropic,
            Self::Anthropic => Self::OpenAi,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o",
            Self::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    pub fn default_generation(&self) -> GenerationDefaults {
        match self {
            Self::OpenAi => GenerationDefaults {
                max_tokens: 2048,
                temperature: 0.3,
            },
            Self::Anthropic => GenerationDefaults {
                max_tokens: 4096,
                temperature: 0.7,
            },
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(DomainError::validation(format!(
                "Unknown backend '{}', expected 'openai' or 'anthropic'",
                other
            ))),
        }
    }
}
