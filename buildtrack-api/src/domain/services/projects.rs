use std::sync::Arc;

use async_trait::async_trait;
use buildtrack_core::domain::{Project, Task};

use crate::domain::{
    ports::{
        inbound::{ProjectService, TaskPatch},
        outbound::{delete_record, find_record, load_all, save_record, RecordStore},
    },
    ProjectError,
};

pub struct ProjectServiceImpl<S> {
    store: Arc<S>,
}

impl<S: RecordStore> ProjectServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load(&self, project_id: &str) -> Result<Project, ProjectError> {
        find_record::<Project>(&*self.store, project_id)
            .await?
            .ok_or_else(|| ProjectError::ProjectNotFound(project_id.to_string()))
    }

    fn check_task(task: &Task) -> Result<(), ProjectError> {
        if task.progress > 100 {
            return Err(ProjectError::Invalid(format!(
                "task {} progress must be between 0 and 100, got {}",
                task.id, task.progress
            )));
        }
        Ok(())
    }

    /// Refresh the cached progress and write the project back.
    async fn persist(&self, mut project: Project) -> Result<Project, ProjectError> {
        project.refresh_progress();
        save_record(&*self.store, &project).await?;
        Ok(project)
    }
}

#[async_trait]
impl<S: RecordStore> ProjectService for ProjectServiceImpl<S> {
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(load_all(&*self.store).await?)
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, ProjectError> {
        self.load(project_id).await
    }

    async fn save_project(&self, project: Project) -> Result<Project, ProjectError> {
        if project.id.as_str().trim().is_empty() {
            return Err(ProjectError::Invalid("project id is required".to_string()));
        }
        project.tasks.iter().try_for_each(Self::check_task)?;
        tracing::debug!(project_id = %project.id, "Saving project");
        self.persist(project).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), ProjectError> {
        self.load(project_id).await?;
        delete_record::<Project>(&*self.store, project_id).await?;
        tracing::info!(project_id, "Deleted project");
        Ok(())
    }

    async fn add_task(&self, project_id: &str, task: Task) -> Result<Project, ProjectError> {
        Self::check_task(&task)?;
        let mut project = self.load(project_id).await?;
        if project.task(&task.id).is_some() {
            return Err(ProjectError::DuplicateTask(task.id.to_string()));
        }
        project.tasks.push(task);
        self.persist(project).await
    }

    async fn update_task(
        &self,
        project_id: &str,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<Project, ProjectError> {
        let mut project = self.load(project_id).await?;
        let task = project
            .tasks
            .iter_mut()
            .find(|t| t.id.as_str() == task_id)
            .ok_or_else(|| ProjectError::TaskNotFound(task_id.to_string()))?;
        patch.apply(task);
        self.persist(project).await
    }

    async fn remove_task(&self, project_id: &str, task_id: &str) -> Result<Project, ProjectError> {
        let mut project = self.load(project_id).await?;
        let before = project.tasks.len();
        project.tasks.retain(|t| t.id.as_str() != task_id);
        if project.tasks.len() == before {
            return Err(ProjectError::TaskNotFound(task_id.to_string()));
        }
        self.persist(project).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::MemoryRecordStore;
    use buildtrack_core::domain::ProjectStatus;

    async fn service_with(projects: Vec<Project>) -> ProjectServiceImpl<MemoryRecordStore> {
        let store = Arc::new(MemoryRecordStore::new());
        for project in projects.iter().rev() {
            save_record(&*store, project).await.unwrap();
        }
        ProjectServiceImpl::new(store)
    }

    fn tower() -> Project {
        Project::new("p1", "HN-01", "Hanoi Tower").with_tasks(vec![
            Task::new("t1", "Piling", "2024-01-01", "2024-01-31").with_progress(100),
            Task::new("t2", "Basement", "2024-02-01", "2024-03-31").with_progress(50),
        ])
    }

    #[tokio::test]
    async fn save_refreshes_stale_progress() {
        let service = service_with(vec![]).await;
        let mut project = tower();
        project.progress = 3;

        let saved = service.save_project(project).await.unwrap();
        assert_eq!(saved.progress, 75);
        assert_eq!(service.get_project("p1").await.unwrap().progress, 75);
    }

    #[tokio::test]
    async fn task_mutations_keep_progress_in_sync() {
        let service = service_with(vec![tower()]).await;

        let project = service
            .add_task("p1", Task::new("t3", "Superstructure", "2024-04-01", "2024-06-30"))
            .await
            .unwrap();
        assert_eq!(project.progress, 50);

        let project = service
            .update_task(
                "p1",
                "t3",
                TaskPatch {
                    progress: Some(150),
                    status: Some(ProjectStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(project.task(&"t3".into()).map(|t| t.progress), Some(100));
        assert_eq!(project.progress, 83);

        let project = service.remove_task("p1", "t1").await.unwrap();
        assert_eq!(project.progress, 75);

        let stored = service.get_project("p1").await.unwrap();
        assert_eq!(stored.progress, 75);
        assert_eq!(stored.tasks.len(), 2);
    }

    #[tokio::test]
    async fn removing_the_last_task_resets_progress() {
        let project = Project::new("p1", "HN-01", "Hanoi Tower")
            .with_tasks(vec![Task::new("t1", "Only", "2024-01-01", "2024-01-02").with_progress(80)]);
        let service = service_with(vec![project]).await;

        let project = service.remove_task("p1", "t1").await.unwrap();
        assert_eq!(project.progress, 0);
    }

    #[tokio::test]
    async fn missing_records_are_reported() {
        let service = service_with(vec![tower()]).await;

        assert!(matches!(
            service.get_project("nope").await,
            Err(ProjectError::ProjectNotFound(_))
        ));
        assert!(matches!(
            service.update_task("p1", "nope", TaskPatch::default()).await,
            Err(ProjectError::TaskNotFound(_))
        ));
        assert!(matches!(
            service
                .add_task("p1", Task::new("t1", "Again", "2024-01-01", "2024-01-02"))
                .await,
            Err(ProjectError::DuplicateTask(_))
        ));
    }

    #[tokio::test]
    async fn out_of_range_task_progress_is_rejected() {
        let service = service_with(vec![tower()]).await;
        let mut task = Task::new("t3", "Roofing", "2024-04-01", "2024-04-30");
        task.progress = 250;

        assert!(matches!(
            service.add_task("p1", task.clone()).await,
            Err(ProjectError::Invalid(_))
        ));
        assert_eq!(service.get_project("p1").await.unwrap().tasks.len(), 2);

        let mut project = tower();
        project.tasks.push(task);
        assert!(matches!(
            service.save_project(project).await,
            Err(ProjectError::Invalid(_))
        ));
        assert_eq!(service.get_project("p1").await.unwrap().progress, 75);
    }

    #[tokio::test]
    async fn delete_removes_the_project() {
        let service = service_with(vec![tower()]).await;
        service.delete_project("p1").await.unwrap();
        assert!(service.list_projects().await.unwrap().is_empty());
    }
}
