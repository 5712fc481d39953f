use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The completion credentials are optional at startup: their absence is a
/// per-request condition surfaced by the chat route as a configuration
/// error, so the service still boots and serves knowledge routes without
/// them.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: Option<String>,
    pub llm_api_base: Option<String>,
    pub llm_model: String,
    pub knowledge_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: optional_env("LLM_API_KEY"),
            llm_api_base: optional_env("LLM_API_BASE"),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            knowledge_dir: std::env::var("KNOWLEDGE_DIR")
                .unwrap_or_else(|_| "data/cities".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Treats unset and empty variables the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
