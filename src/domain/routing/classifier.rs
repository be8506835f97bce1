use super::RequestType;
use crate::domain::llm::ChatMessage;

#[cfg(test)]
use mockall::automock;

const DOCUMENT_KEYWORDS: &[&str] = &[
    "document",
    "analysis",
    "statement",
    "contract",
    "agreement",
    "form",
];

const CALCULATION_KEYWORDS: &[&str] = &[
    "calculate",
    "rate",
    "cost",
    "savings",
    "percentage",
    "fee",
];

const MARKETING_KEYWORDS: &[&str] = &[
    "marketing",
    "sales strategy",
    "outbound",
    "social media",
    "branding",
    "lead generation",
    "hormozi",
    "vaynerchuk",
];

/// Maps a conversation to a request type.
///
/// Implementations must be pure and must always produce a type.
#[cfg_attr(test, automock)]
pub trait RequestClassifier: Send + Sync {
    fn classify(&self, messages: &[ChatMessage]) -> RequestType;
}

/// Keyword classifier over the lowercased text of the last message.
///
/// Categories are checked in a fixed order (documents, calculation,
/// marketing) and the first hit wins. Matching is plain substring search, so
/// "form" also hits "platform". A conversation with at most one user message
/// and no keyword hit is `Conversation`; everything else is `General`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl RequestClassifier for KeywordClassifier {
    fn classify(&self, messages: &[ChatMessage]) -> RequestType {
        let Some(last) = messages.last() else {
            return RequestType::General;
        };

        let text = last.content.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

        if contains_any(DOCUMENT_KEYWORDS) {
            return RequestType::DocumentAnalysis;
        }

        if contains_any(CALCULATION_KEYWORDS) {
            return RequestType::Calculation;
        }

        if contains_any(MARKETING_KEYWORDS) {
            return RequestType::Marketing;
        }

        let user_messages = messages.iter().filter(|m| m.is_user()).count();

        if user_messages <= 1 {
            RequestType::Conversation
        } else {
            RequestType::General
        }
    }
}
