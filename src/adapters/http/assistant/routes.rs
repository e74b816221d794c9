//! Axum router configuration for the assistant endpoint.

use axum::{routing::post, Router};

use super::handlers::{ask, AssistantAppState};

/// Create the assistant API router.
///
/// # Routes
///
/// - `POST /` - Answer a free-text query (`{"query": string}` -> `{"reply": string}`)
///
/// Suitable for mounting at `/api/assistant`.
pub fn assistant_routes() -> Router<AssistantAppState> {
    Router::new().route("/", post(ask))
}
