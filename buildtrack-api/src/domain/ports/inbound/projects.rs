use async_trait::async_trait;
use buildtrack_core::domain::{Project, ProjectStatus, Task, TaskType};
use serde::Deserialize;

use crate::domain::ProjectError;

/// Partial update of a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub progress: Option<u8>,
    pub status: Option<ProjectStatus>,
    pub assignee_id: Option<String>,
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(task_type) = self.task_type {
            task.task_type = task_type;
        }
        if let Some(start_date) = self.start_date {
            task.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            task.end_date = end_date;
        }
        if let Some(progress) = self.progress {
            task.progress = progress.min(100);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assignee_id = Some(assignee_id);
        }
    }
}

/// Project and task use cases.
///
/// Every path that changes a project's task list recomputes the cached
/// progress before persisting.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    async fn get_project(&self, project_id: &str) -> Result<Project, ProjectError>;

    /// Insert or replace a project.
    async fn save_project(&self, project: Project) -> Result<Project, ProjectError>;

    async fn delete_project(&self, project_id: &str) -> Result<(), ProjectError>;

    async fn add_task(&self, project_id: &str, task: Task) -> Result<Project, ProjectError>;

    async fn update_task(
        &self,
        project_id: &str,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<Project, ProjectError>;

    async fn remove_task(&self, project_id: &str, task_id: &str) -> Result<Project, ProjectError>;
}
