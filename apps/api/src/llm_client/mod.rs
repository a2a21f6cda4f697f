//! LLM Client — the single point of entry for hosted-model calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to a provider API directly.
//! Each provider lives behind the [`ChatBackend`] trait and is looked up
//! through the [`registry::ProviderRegistry`], so adding a provider never
//! touches the request handler.
//!
//! Credentials are request-scoped: they arrive with each [`ChatRequest`] and
//! are never stored on a backend.

use async_trait::async_trait;
use thiserror::Error;

pub mod google;
pub mod openai;
pub mod registry;

/// Deterministic sampling for every backend. Analysis output feeds a scoring
/// contract, not a creative-writing surface.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The backend rejected the supplied credential. Classified separately so
    /// the handler can answer 401 instead of a generic failure.
    #[error("Credential rejected by provider: {0}")]
    Unauthorized(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One chat completion request. Single round trip; the caller gets the full
/// reply text or an error. No retries, no streaming.
#[derive(Debug)]
pub struct ChatRequest<'a> {
    pub credential: &'a str,
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Stable provider identifier, as sent by clients in the provider header.
    fn id(&self) -> &'static str;

    /// Model used when the request carries no override.
    fn default_model(&self) -> &'static str;

    /// Sends the prompt and returns the raw reply text.
    async fn complete(&self, req: ChatRequest<'_>) -> Result<String, LlmError>;
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Models wrap JSON in fences no matter how firmly the prompt forbids it.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
