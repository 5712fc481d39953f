//! Completion Gateway: the single point of entry for outbound completion
//! calls.
//!
//! ARCHITECTURAL RULE: no other module may call the completion API directly.
//! All LLM interactions MUST go through this module.
//!
//! The gateway performs exactly one attempt per call and configures no
//! client-side timeout; transport defaults apply. Retry policy, if ever
//! wanted, belongs to a wrapper at this boundary, not inside it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::chat::models::ChatMessage;

/// Sampling defaults for every guide completion. Fixed at this layer, not
/// user-configurable.
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 800;
const TOP_P: f64 = 0.95;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (connection refused, timeout, DNS). No HTTP
    /// status is available.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the completion endpoint. The status is
    /// propagated verbatim to the HTTP caller.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Success status but no usable candidate in the body.
    #[error("invalid response format")]
    InvalidResponse,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// First candidate's message content, if non-empty. Later candidates
    /// are never read.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-style `/chat/completions` endpoint with bearer-token
/// authentication.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Forwards the message sequence and returns the first completion's
    /// content.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|_| LlmError::InvalidResponse)?;

        let answer = completion.text().ok_or(LlmError::InvalidResponse)?;

        debug!("Completion succeeded ({} chars)", answer.len());
        Ok(answer.to_string())
    }
}

/// Extracts the human-readable message from a structured error body, falling
/// back to a generic status line when the body does not parse.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP error, status={status}"))
}
