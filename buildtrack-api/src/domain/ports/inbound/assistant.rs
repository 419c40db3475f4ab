use async_trait::async_trait;
use time::Date;

use crate::domain::AssistantError;

/// AI assistant use cases.
///
/// Provider failures never surface as errors: they are logged and answered
/// with a fixed fallback text. Only lookups of the records a prompt is built
/// from can fail.
#[async_trait]
pub trait AssistantService: Send + Sync + 'static {
    /// Answer a free-form question, optionally in the context of one project.
    async fn chat(&self, message: &str, project_id: Option<&str>)
        -> Result<String, AssistantError>;

    async fn analyze_project_risks(&self, project_id: &str) -> Result<String, AssistantError>;

    async fn suggest_tasks(&self, project_description: &str) -> Result<String, AssistantError>;

    async fn analyze_pccc_stock(&self, today: Date) -> Result<String, AssistantError>;

    async fn analyze_qaqc(&self) -> Result<String, AssistantError>;
}
