//! HTTP response types.
//!
//! These types serialize to the JSON format expected by the frontend.

use buildtrack_core::{
    aggregation::timeline,
    domain::{PcccMaterial, Project, Task},
};
use serde::Serialize;
use time::Date;

use crate::domain::ports::inbound::AdjustOutcome;

/// A task in schedule order, flagged when it is past its end date and unfinished.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub project_id: String,
    pub project_name: String,
    pub progress: u8,
    pub tasks: Vec<TimelineEntry>,
}

impl TimelineResponse {
    pub fn new(project: &Project, today: Date) -> Self {
        Self {
            project_id: project.id.to_string(),
            project_name: project.name.clone(),
            progress: project.progress,
            tasks: timeline(&project.tasks)
                .into_iter()
                .map(|task| TimelineEntry {
                    overdue: task.is_overdue(today),
                    task: task.clone(),
                })
                .collect(),
        }
    }
}

/// Result of a stock adjustment. `changed` is false when the quantity was
/// already at the bound the delta pushed against.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustResponse {
    pub material: PcccMaterial,
    pub changed: bool,
}

impl From<AdjustOutcome> for AdjustResponse {
    fn from(outcome: AdjustOutcome) -> Self {
        Self {
            material: outcome.material,
            changed: outcome.changed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResultResponse {
    pub imported: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub reply: String,
}

impl From<String> for AssistantReply {
    fn from(reply: String) -> Self {
        Self { reply }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildtrack_core::domain::ProjectStatus;
    use time::macros::date;

    #[test]
    fn timeline_is_ordered_and_flags_overdue_tasks() {
        let project = Project::new("p1", "HN-01", "Hanoi Tower").with_tasks(vec![
            Task::new("t2", "Finishing", "2024-03-01", "2024-03-20"),
            Task::new("t1", "Piling", "2024-01-01", "2024-01-31")
                .with_progress(100)
                .with_status(ProjectStatus::Completed),
            Task::new("t3", "Basement", "2024-02-01", "2024-02-28").with_progress(60),
        ]);

        let response = TimelineResponse::new(&project, date!(2024 - 03 - 11));
        let order: Vec<_> = response
            .tasks
            .iter()
            .map(|e| (e.task.id.as_str(), e.overdue))
            .collect();
        assert_eq!(order, vec![("t1", false), ("t3", true), ("t2", false)]);

        let json = serde_json::to_value(&response.tasks[1]).unwrap();
        assert_eq!(json["overdue"], true);
        assert_eq!(json["startDate"], "2024-02-01");
    }
}
