use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::Date;

use super::{ProjectId, RecordId, TaskId};
use crate::{aggregation, dates};

/// Lifecycle status shared by projects and their tasks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "PascalCase")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Delayed,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskType {
    Construction,
    Electrical,
    Plumbing,
    Finishing,
    Inspection,
    General,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub map_link: Option<String>,
}

/// A scheduled work item owned by exactly one [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, expected to be on or after `start_date` (not enforced).
    pub end_date: String,
    pub progress: u8,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Informational only; never scheduled or validated.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TaskLocation>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            task_type: TaskType::General,
            start_date: start_date.into(),
            end_date: end_date.into(),
            progress: 0,
            status: ProjectStatus::Planning,
            assignee_id: None,
            dependencies: Vec::new(),
            location: None,
            images: Vec::new(),
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn end(&self) -> Option<Date> {
        dates::parse_date(&self.end_date)
    }

    /// Not completed, not at 100%, and the end date has passed.
    pub fn is_overdue(&self, today: Date) -> bool {
        if self.status == ProjectStatus::Completed || self.progress >= 100 {
            return false;
        }
        self.end().is_some_and(|end| end < today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: RecordId,
    pub name: String,
    pub role: String,
    pub status: WorkerStatus,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteMaterialStatus {
    Available,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

/// Generic on-site material, tracked per project (not the PCCC warehouse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMaterial {
    pub id: RecordId,
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub status: SiteMaterialStatus,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStage {
    pub id: RecordId,
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PaymentStage {
    /// Money that is committed but not yet paid out.
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, PaymentStatus::Pending | PaymentStatus::Overdue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DocumentType {
    Legal,
    Design,
    Contract,
    Handover,
    Invoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DocumentStatus {
    Draft,
    Approved,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub upload_date: String,
    pub status: DocumentStatus,
    pub uploaded_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
}

/// A construction project and everything it owns.
///
/// `progress` is a cache of [`aggregation::compute_project_progress`] over
/// `tasks`. Anything that changes the task list must call
/// [`Project::refresh_progress`] before the project is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    pub name: String,
    pub location: String,
    pub manager: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub spent: f64,
    pub status: ProjectStatus,
    pub progress: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub materials: Vec<SiteMaterial>,
    #[serde(default)]
    pub financials: Vec<PaymentStage>,
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            location: String::new(),
            manager: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            budget: 0.0,
            spent: 0.0,
            status: ProjectStatus::Planning,
            progress: 0,
            description: String::new(),
            tasks: Vec::new(),
            workers: Vec::new(),
            materials: Vec::new(),
            financials: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_budget(mut self, budget: f64, spent: f64) -> Self {
        self.budget = budget;
        self.spent = spent;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self.refresh_progress();
        self
    }

    pub fn refresh_progress(&mut self) {
        self.progress = aggregation::compute_project_progress(&self.tasks);
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn project_status_uses_pascal_case_on_the_wire() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"InProgress\"");
    }

    #[test]
    fn unknown_task_type_is_rejected() {
        let result: Result<TaskType, _> = serde_json::from_str("\"demolition\"");
        assert!(result.is_err());
    }

    #[test]
    fn task_deserializes_without_optional_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","name":"Foundation","type":"construction","startDate":"2024-03-01",
                "endDate":"2024-03-10","progress":40,"status":"InProgress"}"#,
        )
        .unwrap();

        assert_eq!(task.task_type, TaskType::Construction);
        assert!(task.dependencies.is_empty());
        assert!(task.location.is_none());
    }

    #[test]
    fn overdue_requires_open_task_past_its_end() {
        let today = date!(2024 - 03 - 11);
        let open = Task::new("t1", "Slab", "2024-03-01", "2024-03-10").with_progress(50);
        assert!(open.is_overdue(today));

        let finished = open.clone().with_progress(100);
        assert!(!finished.is_overdue(today));

        let completed = open.clone().with_status(ProjectStatus::Completed);
        assert!(!completed.is_overdue(today));

        let due_today = Task::new("t2", "Walls", "2024-03-01", "2024-03-11");
        assert!(!due_today.is_overdue(today));
    }

    #[test]
    fn with_tasks_refreshes_cached_progress() {
        let project = Project::new("p1", "P-01", "Tower A").with_tasks(vec![
            Task::new("t1", "A", "2024-01-01", "2024-01-02").with_progress(50),
            Task::new("t2", "B", "2024-01-01", "2024-01-02").with_progress(100),
        ]);
        assert_eq!(project.progress, 75);
    }
}
