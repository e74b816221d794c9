//! HTTP handlers for the assistant endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;

use crate::application::AnswerQueryHandler;
use crate::domain::assistant::SelectionKey;

use super::dto::{AskRequest, AskResponse};

/// Header selecting the caller's selection-memory key.
const SESSION_HEADER: &str = "x-session-id";

/// Reply text for oracle failures. Transport detail goes to the log only.
const FAILURE_REPLY: &str =
    "Sorry - the assistant is temporarily unavailable. Please try again in a moment.";

/// Application state for the assistant endpoint.
#[derive(Clone)]
pub struct AssistantAppState {
    /// Query use-case handler (injected).
    pub handler: Arc<AnswerQueryHandler>,
}

/// Answer a free-text query.
///
/// POST /api/assistant
pub async fn ask(
    State(state): State<AssistantAppState>,
    headers: HeaderMap,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    let key = session_key(&headers);

    match state.handler.handle(&key, &request.query).await {
        Ok(reply) => (StatusCode::OK, Json(AskResponse { reply })),
        Err(err) => {
            error!(error = %err, session = key.as_str(), "assistant turn failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(AskResponse {
                    reply: FAILURE_REPLY.to_string(),
                }),
            )
        }
    }
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn session_key(headers: &HeaderMap) -> SelectionKey {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(SelectionKey::new)
        .unwrap_or_else(SelectionKey::anonymous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_key_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("alice"));
        assert_eq!(session_key(&headers).as_str(), "alice");
    }

    #[test]
    fn missing_header_maps_to_anonymous() {
        let headers = HeaderMap::new();
        assert_eq!(session_key(&headers), SelectionKey::anonymous());
    }

    #[test]
    fn invalid_header_bytes_map_to_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_bytes(b"\xff\xfe").unwrap(),
        );
        assert_eq!(session_key(&headers), SelectionKey::anonymous());
    }
}
