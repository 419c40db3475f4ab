use async_trait::async_trait;

use crate::domain::CompletionError;

/// Outbound port for a text-completion model.
#[async_trait]
pub trait CompletionClient: Send + Sync + 'static {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Whether a real provider sits behind this client.
    fn is_configured(&self) -> bool {
        true
    }
}
