//! Chat and classify endpoint handlers

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatRequest, ClassifyRequest, ClassifyResponse, Json};
use crate::domain::RoutingResult;

/// POST /v1/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<RoutingResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        messages = request.messages.len(),
        force_backend = ?request.force_backend,
        "Processing chat request"
    );

    if request.messages.is_empty() {
        return Err(ApiError::bad_request("Messages cannot be empty").with_param("messages"));
    }

    let system_prompt = request
        .system_prompt
        .as_deref()
        .unwrap_or(&state.default_system_prompt);

    let result = state
        .router
        .route(&request.messages, system_prompt, &request.routing_options())
        .await?;

    info!(
        request_id = %request_id,
        backend = %result.used_backend,
        had_fallback = result.had_fallback,
        "Chat request completed"
    );

    Ok(Json(result))
}

/// POST /v1/classify
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    Json(state.router.plan(&request.messages))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::router::create_router;
    use crate::api::state::AppState;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{Backend, ModelRouter};

    fn app(openai: Arc<MockLlmProvider>, anthropic: Arc<MockLlmProvider>) -> Router {
        let router = ModelRouter::new(openai, anthropic).unwrap();
        create_router(AppState::new(router, "You are JACC"), None, "/metrics")
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_routes_request() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("unused"));
        let anthropic =
            Arc::new(MockLlmProvider::new(Backend::Anthropic).with_response("Hello there"));

        let response = app(openai, anthropic.clone())
            .oneshot(post(
                "/v1/chat",
                serde_json::json!({"messages": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["content"], "Hello there");
        assert_eq!(body["used_backend"], "anthropic");
        assert_eq!(body["had_fallback"], false);
        assert_eq!(body["request_type"], "conversation");

        let sent = anthropic.last_request().unwrap();
        assert_eq!(sent.system_prompt, "You are JACC");
    }

    #[tokio::test]
    async fn test_chat_uses_caller_system_prompt() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("ok"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_response("ok"));

        app(openai, anthropic.clone())
            .oneshot(post(
                "/v1/chat",
                serde_json::json!({
                    "messages": [{"role": "user", "content": "hi"}],
                    "system_prompt": "Answer in one line"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(
            anthropic.last_request().unwrap().system_prompt,
            "Answer in one line"
        );
    }

    #[tokio::test]
    async fn test_chat_reports_fallback() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("backup"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_error("down"));

        let response = app(openai, anthropic)
            .oneshot(post(
                "/v1/chat",
                serde_json::json!({"messages": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["used_backend"], "openai");
        assert_eq!(body["had_fallback"], true);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_messages() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("ok"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_response("ok"));

        let response = app(openai.clone(), anthropic.clone())
            .oneshot(post("/v1/chat", serde_json::json!({"messages": []})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["param"], "messages");
        assert_eq!(openai.call_count() + anthropic.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_both_backends_fail() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_error("rate limited"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_error("down"));

        let response = app(openai, anthropic)
            .oneshot(post(
                "/v1/chat",
                serde_json::json!({"messages": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "all_backends_failed");
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("ok"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_response("ok"));

        let response = app(openai, anthropic)
            .oneshot(post("/v1/chat", serde_json::json!({"prompt": "hi"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_classify_does_not_call_backends() {
        let openai = Arc::new(MockLlmProvider::new(Backend::OpenAi).with_response("ok"));
        let anthropic = Arc::new(MockLlmProvider::new(Backend::Anthropic).with_response("ok"));

        let response = app(openai.clone(), anthropic.clone())
            .oneshot(post(
                "/v1/classify",
                serde_json::json!({"messages": [
                    {"role": "user", "content": "hello"},
                    {"role": "user", "content": "what's the effective rate on this?"}
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["request_type"], "calculation");
        assert_eq!(body["preferred"], "openai");
        assert_eq!(body["fallback"], "anthropic");
        assert_eq!(openai.call_count() + anthropic.call_count(), 0);
    }
}
