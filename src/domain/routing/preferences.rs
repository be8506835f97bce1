use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Backend, RequestType};
use crate::domain::DomainError;

/// Preferred and fallback backend for one request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPreference {
    pub request_type: RequestType,
    pub preferred: Backend,
    pub fallback: Backend,
}

impl ModelPreference {
    /// Preference whose fallback is the other backend
    pub fn new(request_type: RequestType, preferred: Backend) -> Self {
        Self {
            request_type,
            preferred,
            fallback: preferred.other(),
        }
    }
}

/// Read-only lookup from request type to backend pair.
///
/// Built once at start-up; every request type has exactly one entry and no
/// entry names the same backend twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPreferenceTable {
    entries: HashMap<RequestType, ModelPreference>,
}

impl ModelPreferenceTable {
    pub fn new(
        preferences: impl IntoIterator<Item = ModelPreference>,
    ) -> Result<Self, DomainError> {
        let mut entries = HashMap::new();

        for preference in preferences {
            if preference.preferred == preference.fallback {
                return Err(DomainError::configuration(format!(
                    "Request type '{}' uses '{}' as both preferred and fallback backend",
                    preference.request_type, preference.preferred
                )));
            }

            if entries.insert(preference.request_type, preference).is_some() {
                return Err(DomainError::configuration(format!(
                    "Duplicate preference for request type '{}'",
                    preference.request_type
                )));
            }
        }

        if let Some(missing) = RequestType::ALL.iter().find(|t| !entries.contains_key(*t)) {
            return Err(DomainError::configuration(format!(
                "No backend preference for request type '{}'",
                missing
            )));
        }

        Ok(Self { entries })
    }

    /// Replace the preferred backend for one request type; the fallback
    /// becomes the other backend
    pub fn with_preferred(mut self, request_type: RequestType, preferred: Backend) -> Self {
        self.entries
            .insert(request_type, ModelPreference::new(request_type, preferred));
        self
    }

    pub fn get(&self, request_type: RequestType) -> ModelPreference {
        // `new` guarantees an entry per request type
        self.entries
            .get(&request_type)
            .copied()
            .unwrap_or_else(|| ModelPreference::new(request_type, Backend::Anthropic))
    }

    pub fn entries(&self) -> Vec<ModelPreference> {
        RequestType::ALL.iter().map(|t| self.get(*t)).collect()
    }
}

impl Default for ModelPreferenceTable {
    fn default() -> Self {
        let entries = [
            (RequestType::DocumentAnalysis, Backend::Anthropic),
            (RequestType::Calculation, Backend::OpenAi),
            (RequestType::Conversation, Backend::Anthropic),
            (RequestType::Marketing, Backend::Anthropic),
            (RequestType::General, Backend::Anthropic),
        ]
        .into_iter()
        .map(|(request_type, preferred)| {
            (request_type, ModelPreference::new(request_type, preferred))
        })
        .collect();

        Self { entries }
    }
}
