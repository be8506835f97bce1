use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Coarse intent category derived from the latest message, used only to pick
/// a backend pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    DocumentAnalysis,
    Calculation,
    Conversation,
    Marketing,
    General,
}

impl RequestType {
    pub const ALL: [RequestType; 5] = [
        RequestType::DocumentAnalysis,
        RequestType::Calculation,
        RequestType::Conversation,
        RequestType::Marketing,
        RequestType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentAnalysis => "document_analysis",
            Self::Calculation => "calculation",
            Self::Conversation => "conversation",
            Self::Marketing => "marketing",
            Self::General => "general",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown request type '{}'", s)))
    }
}
