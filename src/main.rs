//! ERP Assistant server binary.
//!
//! Loads configuration, wires the query agent together and serves the
//! assistant endpoint. The record store is the in-memory demo adapter; the
//! authoritative data system is owned elsewhere and plugs in behind the same
//! port.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use erp_assistant::adapters::ai::{OpenAiOracle, OpenAiOracleConfig};
use erp_assistant::adapters::http::{app_router, assistant::AssistantAppState};
use erp_assistant::adapters::store::InMemoryRecordStore;
use erp_assistant::application::AnswerQueryHandler;
use erp_assistant::config::AppConfig;
use erp_assistant::domain::assistant::{
    FollowUpDetector, QueryOrchestrator, SelectionStore, ToolDispatcher,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "erp-assistant starting"
    );

    // Ports and domain wiring.
    let store = Arc::new(InMemoryRecordStore::sample());
    let oracle = Arc::new(OpenAiOracle::new(OpenAiOracleConfig::from_app_config(
        &config.ai,
    )));
    let selections = Arc::new(SelectionStore::new());
    let dispatcher = Arc::new(ToolDispatcher::new(store, Arc::clone(&selections)));
    let orchestrator = Arc::new(QueryOrchestrator::new(oracle, Arc::clone(&dispatcher)));
    let detector = FollowUpDetector::new(selections);
    let handler = Arc::new(AnswerQueryHandler::new(detector, dispatcher, orchestrator));

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::permissive(),
        origins => CorsLayer::new().allow_origin(AllowOrigin::list(
            origins.iter().filter_map(|o| o.parse().ok()),
        )),
    };

    let app = app_router(AssistantAppState { handler })
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
