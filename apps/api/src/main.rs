mod chat;
mod config;
mod errors;
mod knowledge;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge::store::KnowledgeStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CityGuide API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the flat-file knowledge store
    let knowledge = Arc::new(KnowledgeStore::new(&config.knowledge_dir));
    info!("Knowledge store initialized (dir: {})", config.knowledge_dir);

    // Initialize the completion client when credentials are present.
    // Absence is a per-request condition surfaced by the chat route.
    let llm = match (&config.llm_api_key, &config.llm_api_base) {
        (Some(key), Some(base)) => {
            info!("Completion client initialized (model: {})", config.llm_model);
            Some(LlmClient::new(
                key.clone(),
                base.clone(),
                config.llm_model.clone(),
            ))
        }
        _ => {
            warn!("LLM_API_KEY or LLM_API_BASE not set; /api/ai will return a configuration error");
            None
        }
    };

    let state = AppState { knowledge, llm };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
