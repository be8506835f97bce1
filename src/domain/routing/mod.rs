//! Request classification, backend preferences and fallback routing

mod backend;
mod classifier;
mod preferences;
mod request_type;
mod router;

pub use backend::Backend;
pub use classifier::{KeywordClassifier, RequestClassifier};
pub use preferences::{ModelPreference, ModelPreferenceTable};
pub use request_type::RequestType;
pub use router::{ModelRouter, RoutingOptions, RoutingResult};

#[cfg(test)]
pub use classifier::MockRequestClassifier;
