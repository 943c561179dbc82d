//! Environment-driven runtime configuration.

use std::env;

/// Application configuration, read once at startup.
///
/// Optional values switch features: no `DATABASE_URL` selects the in-memory
/// store, no `GEMINI_API_KEY` disables the AI provider (insights fall back to
/// canned responses, smart add reports a parse failure).
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`, default 3001)
    pub port: u16,
    /// SQLite database URL (`DATABASE_URL`); unset means in-memory store
    pub database_url: Option<String>,
    /// Allowed CORS origin (`FRONTEND_URL`, default http://localhost:5173)
    pub frontend_url: String,
    /// Gemini API key (`GEMINI_API_KEY`); unset disables the AI provider
    pub gemini_api_key: Option<String>,
    /// Gemini model name (`GEMINI_MODEL`, default gemini-1.5-flash)
    pub gemini_model: String,
    /// Request timeout for AI calls in seconds (`AI_TIMEOUT_SECS`, default 10)
    pub ai_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            ai_timeout_secs: env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
