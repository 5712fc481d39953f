//! Axum route handlers for the guide chat API.

use axum::{extract::State, Json};
use tracing::info;

use crate::chat::composer::compose;
use crate::chat::models::{AskRequest, AskResponse, CitiesResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/ai
///
/// Validates the request, looks up verified city knowledge, composes the
/// prompt, and forwards the conversation to the completion API. Validation
/// failures never reach a downstream component.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let query = required_field(request.query.as_deref(), "query")?;
    let city = required_field(request.city.as_deref(), "city")?;

    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::Configuration("completion API key or base URL is not configured".to_string())
    })?;

    let city_info = state.knowledge.lookup(city).await;
    info!(
        "Guide query for city '{}' (verified knowledge: {})",
        city,
        if city_info.is_some() { "yes" } else { "no" }
    );

    let composed = compose(city, city_info.as_deref(), query, request.context.as_deref());
    let answer = llm.complete(&composed.messages).await?;

    Ok(Json(AskResponse { answer }))
}

/// GET /api/cities
///
/// Lists cities with verified knowledge available. Backs the city picker.
pub async fn handle_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.knowledge.known_cities().await,
    })
}

fn required_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing required field: {name}")))
}
