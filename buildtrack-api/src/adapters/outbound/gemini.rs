//! Gemini completion client using the genai crate.

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};

use crate::domain::{ports::outbound::CompletionClient, CompletionError};

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Completion client backed by Google's Gemini API.
///
/// The genai client reads `GEMINI_API_KEY` from the environment.
#[derive(Clone)]
pub struct GeminiCompletionClient {
    client: genai::Client,
    model: String,
}

impl GeminiCompletionClient {
    pub fn new() -> Self {
        Self::with_model(GEMINI_MODEL)
    }

    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            client: genai::Client::default(),
            model: model.into(),
        }
    }

    /// Returns `None` if `GEMINI_API_KEY` is not set.
    pub fn try_from_env(model: Option<&str>) -> Option<Self> {
        if std::env::var("GEMINI_API_KEY").is_err() {
            return None;
        }
        Some(match model {
            Some(model) => Self::with_model(model),
            None => Self::new(),
        })
    }
}

impl Default for GeminiCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for GeminiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        response
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(CompletionError::EmptyResponse)
    }
}

/// Stand-in used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCompletionClient;

#[async_trait]
impl CompletionClient for DisabledCompletionClient {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
