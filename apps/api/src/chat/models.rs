use serde::{Deserialize, Serialize};

/// Message author role in a completion conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn in the conversation forwarded to the completion API. Lives only
/// for a single request cycle; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/ai`. `query` and `city` are optional at the serde
/// layer so the handler can map absence to 400 with a descriptive message
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: Option<String>,
    pub city: Option<String>,
    /// Last assistant reply, passed back verbatim as short conversational
    /// context. Not full history.
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}
