pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/ai", post(handlers::handle_ask))
        .route("/api/cities", get(handlers::handle_cities))
        .with_state(state)
}
