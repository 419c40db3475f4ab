//! Mock completion client for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{ports::outbound::CompletionClient, CompletionError};

/// Completion client that answers with a fixed reply, or fails on demand,
/// and records every prompt it receives.
#[derive(Clone)]
pub struct MockCompletion {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockCompletion {
    pub fn returning(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Arc::default(),
        }
    }

    /// A client whose every request fails.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| CompletionError::Request("mock failure".to_string()))
    }
}
