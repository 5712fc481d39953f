use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Wire shape is `{"error": <message>}`; every response body carries either
/// `answer` or `error`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required request fields. Client fault; never logged
    /// as a system fault.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required service credentials/endpoint absent: deployment
    /// misconfiguration, not a per-request condition.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure from the external completion call. An upstream HTTP status,
    /// when present, is propagated verbatim.
    #[error("Gateway error: {0}")]
    Gateway(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Gateway(e) => {
                tracing::error!("Completion gateway error: {e}");
                match e {
                    LlmError::Api { status, message } => (
                        StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                        message.clone(),
                    ),
                    other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let response = AppError::Validation("Missing required field: query".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required field: query");
    }

    #[tokio::test]
    async fn test_upstream_status_propagates_verbatim() {
        let response = AppError::Gateway(LlmError::Api {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Rate limit exceeded");
    }

    #[tokio::test]
    async fn test_upstream_500_propagates_verbatim() {
        let response = AppError::Gateway(LlmError::Api {
            status: 500,
            message: "HTTP error, status=500".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_statusless_gateway_error_maps_to_500() {
        let response = AppError::Gateway(LlmError::InvalidResponse).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid response format");
    }

    #[tokio::test]
    async fn test_configuration_maps_to_500() {
        let response = AppError::Configuration("not configured".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
