/// Model Gateway: the single point of entry for all generative-model calls.
///
/// ARCHITECTURAL RULE: No other module may call the model backend directly.
/// Every prompt goes through `ModelGateway::generate`, which owns recovery of
/// malformed output (fence stripping + the repair pipeline in `repair`).
///
/// One attempt per call. Retry policy belongs to the caller or infrastructure.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod gemini;
pub mod prompts;
pub mod repair;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is logged, never surfaced: it may echo the prompt.
    #[error("model backend returned status {status}")]
    Api { status: u16, message: String },

    #[error("generation blocked by the backend: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    /// Repaired text still failed to parse. `raw` is kept for diagnostics only.
    #[error("model output is not valid JSON: {source}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LlmError {
    /// True for failures of the backend call itself, false for parse failures.
    pub fn is_generation_failure(&self) -> bool {
        !matches!(self, LlmError::Parse { .. })
    }

    /// Backend error body or raw model text. For logs only.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            LlmError::Api { message, .. } => Some(message),
            LlmError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// A text-completion backend. Implement this to swap the model provider
/// (or substitute a fake in tests) without touching any caller.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model name, for logs.
    fn model(&self) -> &str;
}

/// Cheap to clone; all clones share one immutable backend handle.
#[derive(Clone)]
pub struct ModelGateway {
    backend: Arc<dyn CompletionBackend>,
}

impl ModelGateway {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Sends `prompt` to the backend and returns the repaired, parsed JSON.
    pub async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        let raw = self.backend.complete(prompt).await.map_err(|e| {
            error!(model = self.backend.model(), "Model generation failed: {e}");
            e
        })?;

        parse_model_output(&raw)
    }
}

/// Strips fences, applies the repair pipeline and parses the result.
pub fn parse_model_output(raw: &str) -> Result<Value, LlmError> {
    let repaired = repair::sanitize(raw);

    serde_json::from_str(&repaired).map_err(|source| {
        warn!("Model output failed to parse after repair: {source}");
        debug!(repaired = %repaired, "Repaired model output");
        LlmError::Parse {
            raw: raw.to_string(),
            source,
        }
    })
}
