use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::{CompletionService, SendMessageUseCase};

/// Surfaced on HTTP 400 when the message field is missing or blank.
const ERR_MESSAGE_REQUIRED: &str = "Message is required";
/// Surfaced on HTTP 500. Upstream details are logged, never leaked.
const ERR_UPSTREAM: &str = "Error processing your request";

/// Shared handler state: the one use case behind the proxy endpoint.
#[derive(Clone)]
pub struct AppState {
    send_message: Arc<SendMessageUseCase>,
}

impl AppState {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self {
            send_message: Arc::new(SendMessageUseCase::new(completion_service)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Absent and empty are treated the same: HTTP 400.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the HTTP surface: `POST /api/chat` plus a liveness probe.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// The proxy endpoint. One synchronous upstream call per request; errors map
/// to exactly two client-visible shapes (400 validation, 500 generic).
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let message = request.message.unwrap_or_default();

    match state.send_message.execute(&message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) if e.is_invalid_input() => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: ERR_MESSAGE_REQUIRED.to_string(),
            }),
        )),
        Err(e) => {
            error!("Completion API error: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: ERR_UPSTREAM.to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::MockCompletion;

    fn state_with(mock: Arc<MockCompletion>) -> AppState {
        AppState::new(mock)
    }

    #[tokio::test]
    async fn test_chat_success() {
        let state = state_with(Arc::new(MockCompletion::replying("hi there")));
        let request = ChatRequest {
            message: Some("Hello".to_string()),
        };

        let Json(body) = chat(State(state), Json(request)).await.unwrap();
        assert_eq!(body.response, "hi there");
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_400() {
        let mock = Arc::new(MockCompletion::replying("unused"));
        let state = state_with(mock.clone());

        let (status, Json(body)) = chat(State(state), Json(ChatRequest { message: None }))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, ERR_MESSAGE_REQUIRED);
        assert_eq!(mock.call_count(), 0, "upstream must not be called");
    }

    #[tokio::test]
    async fn test_chat_blank_message_is_400() {
        let mock = Arc::new(MockCompletion::replying("unused"));
        let state = state_with(mock.clone());
        let request = ChatRequest {
            message: Some("   ".to_string()),
        };

        let (status, _) = chat(State(state), Json(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_is_generic_500() {
        let state = state_with(Arc::new(MockCompletion::failing("rate limited: key xyz")));
        let request = ChatRequest {
            message: Some("Hello".to_string()),
        };

        let (status, Json(body)) = chat(State(state), Json(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, ERR_UPSTREAM);
        assert!(
            !body.error.contains("xyz"),
            "upstream detail must not leak to the client"
        );
    }

    #[tokio::test]
    async fn test_chat_empty_provider_reply_gets_fallback() {
        let state = state_with(Arc::new(MockCompletion::replying("")));
        let request = ChatRequest {
            message: Some("Hello".to_string()),
        };

        let Json(body) = chat(State(state), Json(request)).await.unwrap();
        assert!(!body.response.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }
}
