use std::sync::Arc;

use async_trait::async_trait;
use buildtrack_core::{
    domain::{AcceptanceStatus, AcceptanceTask, AcceptanceTaskId, Project, TransitionPolicy},
    qaqc::{
        group_by_category, readiness_summary, AcceptanceDraft, AcceptanceFilter, CategoryGroup,
        ReadinessSummary,
    },
};
use time::{Date, OffsetDateTime};

use crate::domain::{
    ports::{
        inbound::QaqcService,
        outbound::{delete_record, find_record, load_all, save_record, RecordStore},
    },
    QaqcError,
};

pub struct QaqcServiceImpl<S> {
    store: Arc<S>,
    policy: TransitionPolicy,
}

impl<S: RecordStore> QaqcServiceImpl<S> {
    pub fn new(store: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    async fn load(&self, task_id: &str) -> Result<AcceptanceTask, QaqcError> {
        find_record::<AcceptanceTask>(&*self.store, task_id)
            .await?
            .ok_or_else(|| QaqcError::TaskNotFound(task_id.to_string()))
    }

    async fn next_id(&self) -> Result<AcceptanceTaskId, QaqcError> {
        let existing: Vec<AcceptanceTask> = load_all(&*self.store).await?;
        let mut stamp = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        // Two creations within the same millisecond would collide.
        while existing
            .iter()
            .any(|t| t.id.as_str() == format!("qa-{stamp}"))
        {
            stamp += 1;
        }
        Ok(AcceptanceTaskId::new(format!("qa-{stamp}")))
    }
}

#[async_trait]
impl<S: RecordStore> QaqcService for QaqcServiceImpl<S> {
    async fn list_tasks(
        &self,
        filter: &AcceptanceFilter,
    ) -> Result<Vec<AcceptanceTask>, QaqcError> {
        let tasks: Vec<AcceptanceTask> = load_all(&*self.store).await?;
        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    async fn create_task(
        &self,
        draft: AcceptanceDraft,
        today: Date,
    ) -> Result<AcceptanceTask, QaqcError> {
        if draft.title.trim().is_empty() {
            return Err(QaqcError::MissingTitle);
        }

        let project = find_record::<Project>(&*self.store, draft.project_id.as_str())
            .await?
            .ok_or_else(|| QaqcError::ProjectNotFound(draft.project_id.to_string()))?;

        let id = self.next_id().await?;
        let task = draft.into_task(id, project.name, today);
        save_record(&*self.store, &task).await?;

        tracing::debug!(task_id = %task.id, project_id = %task.project_id, "Created acceptance record");
        Ok(task)
    }

    async fn set_status(
        &self,
        task_id: &str,
        status: AcceptanceStatus,
    ) -> Result<AcceptanceTask, QaqcError> {
        let mut task = self.load(task_id).await?;
        task.set_status(status, self.policy)?;
        save_record(&*self.store, &task).await?;
        Ok(task)
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), QaqcError> {
        self.load(task_id).await?;
        delete_record::<AcceptanceTask>(&*self.store, task_id).await?;
        Ok(())
    }

    async fn grouped(&self, filter: &AcceptanceFilter) -> Result<Vec<CategoryGroup>, QaqcError> {
        let tasks = self.list_tasks(filter).await?;
        Ok(group_by_category(&tasks))
    }

    async fn readiness(&self) -> Result<ReadinessSummary, QaqcError> {
        let tasks: Vec<AcceptanceTask> = load_all(&*self.store).await?;
        Ok(readiness_summary(&tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::MemoryRecordStore;
    use buildtrack_core::{
        domain::AcceptanceCategory,
        qaqc::{DEFAULT_STANDARD_REF, UNASSIGNED_INSPECTOR},
        CoreError,
    };
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 11);

    async fn service(policy: TransitionPolicy) -> QaqcServiceImpl<MemoryRecordStore> {
        let store = Arc::new(MemoryRecordStore::new());
        save_record(&*store, &Project::new("p1", "HN-01", "Hanoi Tower"))
            .await
            .unwrap();
        QaqcServiceImpl::new(store, policy)
    }

    fn draft(title: &str) -> AcceptanceDraft {
        AcceptanceDraft {
            project_id: "p1".into(),
            category: AcceptanceCategory::Sprinkler,
            title: title.to_string(),
            standard_ref: None,
            inspector: Some("  ".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn created_record_gets_defaults_and_project_name() {
        let service = service(TransitionPolicy::Unrestricted).await;

        let task = service.create_task(draft("Pressure test"), TODAY).await.unwrap();
        assert!(task.id.as_str().starts_with("qa-"));
        assert_eq!(task.project_name, "Hanoi Tower");
        assert_eq!(task.status, AcceptanceStatus::Pending);
        assert_eq!(task.standard_ref, DEFAULT_STANDARD_REF);
        assert_eq!(task.inspector.as_deref(), Some(UNASSIGNED_INSPECTOR));
        assert_eq!(task.check_date.as_deref(), Some("2024-03-11"));

        let second = service.create_task(draft("Flush test"), TODAY).await.unwrap();
        assert_ne!(task.id, second.id);
        assert_eq!(
            service
                .list_tasks(&AcceptanceFilter::default())
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn create_validates_title_and_project() {
        let service = service(TransitionPolicy::Unrestricted).await;

        assert!(matches!(
            service.create_task(draft("   "), TODAY).await,
            Err(QaqcError::MissingTitle)
        ));

        let mut orphan = draft("Pump room");
        orphan.project_id = "p9".into();
        assert!(matches!(
            service.create_task(orphan, TODAY).await,
            Err(QaqcError::ProjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn workflow_policy_rejects_skipping_inspection() {
        let service = service(TransitionPolicy::Workflow).await;
        let task = service.create_task(draft("Detector loop"), TODAY).await.unwrap();
        let id = task.id.as_str();

        assert!(matches!(
            service.set_status(id, AcceptanceStatus::Approved).await,
            Err(QaqcError::Transition(CoreError::InvalidTransition { .. }))
        ));

        service.set_status(id, AcceptanceStatus::InProgress).await.unwrap();
        let approved = service.set_status(id, AcceptanceStatus::Approved).await.unwrap();
        assert_eq!(approved.status, AcceptanceStatus::Approved);
    }

    #[tokio::test]
    async fn unrestricted_policy_allows_override() {
        let service = service(TransitionPolicy::Unrestricted).await;
        let task = service.create_task(draft("Exit signs"), TODAY).await.unwrap();

        let approved = service
            .set_status(task.id.as_str(), AcceptanceStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, AcceptanceStatus::Approved);

        let summary = service.readiness().await.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.missing_evidence, vec![task.id.clone()]);
    }

    #[tokio::test]
    async fn delete_then_lookup_fails() {
        let service = service(TransitionPolicy::Unrestricted).await;
        let task = service.create_task(draft("Hydrant"), TODAY).await.unwrap();

        service.delete_task(task.id.as_str()).await.unwrap();
        assert!(matches!(
            service.delete_task(task.id.as_str()).await,
            Err(QaqcError::TaskNotFound(_))
        ));
        assert!(service
            .grouped(&AcceptanceFilter::default())
            .await
            .unwrap()
            .is_empty());
    }
}
