use async_trait::async_trait;
use buildtrack_core::{
    domain::{AcceptanceStatus, AcceptanceTask},
    qaqc::{AcceptanceDraft, AcceptanceFilter, CategoryGroup, ReadinessSummary},
};
use time::Date;

use crate::domain::QaqcError;

/// QA/QC acceptance checklist use cases.
#[async_trait]
pub trait QaqcService: Send + Sync + 'static {
    async fn list_tasks(&self, filter: &AcceptanceFilter)
        -> Result<Vec<AcceptanceTask>, QaqcError>;

    /// Create a Pending record for an existing project.
    async fn create_task(
        &self,
        draft: AcceptanceDraft,
        today: Date,
    ) -> Result<AcceptanceTask, QaqcError>;

    /// Change the status, validated by the configured transition policy.
    async fn set_status(
        &self,
        task_id: &str,
        status: AcceptanceStatus,
    ) -> Result<AcceptanceTask, QaqcError>;

    async fn delete_task(&self, task_id: &str) -> Result<(), QaqcError>;

    async fn grouped(&self, filter: &AcceptanceFilter) -> Result<Vec<CategoryGroup>, QaqcError>;

    async fn readiness(&self) -> Result<ReadinessSummary, QaqcError>;
}
