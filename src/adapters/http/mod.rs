//! HTTP adapters.

pub mod assistant;

use axum::{routing::get, Router};

use assistant::{assistant_routes, AssistantAppState};

/// Assembles the full application router (without middleware layers).
pub fn app_router(state: AssistantAppState) -> Router {
    Router::new()
        .route("/health", get(assistant::handlers::health))
        .nest("/api/assistant", assistant_routes())
        .with_state(state)
}
