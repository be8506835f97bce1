//! API request, response and error types

pub mod chat;
pub mod error;
pub mod json;

pub use chat::{ChatRequest, ClassifyRequest, ClassifyResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
