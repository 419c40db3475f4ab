//! Acceptance checklist views: filtering, grouping and readiness.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use time::Date;

use crate::{
    calendar::ProjectFilter,
    dates,
    domain::{
        AcceptanceCategory, AcceptanceStatus, AcceptanceTask, AcceptanceTaskId, ProjectId,
    },
};

pub const DEFAULT_STANDARD_REF: &str = "TCVN";
pub const UNASSIGNED_INSPECTOR: &str = "Unassigned";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AcceptanceFilter {
    pub status: Option<AcceptanceStatus>,
    #[serde(default)]
    pub project: ProjectFilter,
    pub search: Option<String>,
}

impl AcceptanceFilter {
    /// Search matches title or project name, case-insensitively.
    pub fn matches(&self, task: &AcceptanceTask) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if !self.project.includes(&task.project_id) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                task.title.to_lowercase().contains(&term)
                    || task.project_name.to_lowercase().contains(&term)
            }
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [AcceptanceTask]) -> Vec<&'a AcceptanceTask> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: AcceptanceCategory,
    pub tasks: Vec<AcceptanceTask>,
}

/// Group tasks by system category, in category order. Categories without
/// tasks are omitted; tasks keep their input order within a group.
pub fn group_by_category<'a>(
    tasks: impl IntoIterator<Item = &'a AcceptanceTask>,
) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<AcceptanceCategory, Vec<AcceptanceTask>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.category).or_default().push(task.clone());
    }

    groups
        .into_iter()
        .map(|(category, tasks)| CategoryGroup { category, tasks })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTally {
    pub status: AcceptanceStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSummary {
    pub total: usize,
    /// Every status, zero counts included.
    pub by_status: Vec<StatusTally>,
    /// Approved or in-progress records that carry no evidence document.
    pub missing_evidence: Vec<AcceptanceTaskId>,
}

pub fn readiness_summary(tasks: &[AcceptanceTask]) -> ReadinessSummary {
    let by_status = AcceptanceStatus::iter()
        .map(|status| StatusTally {
            status,
            count: tasks.iter().filter(|t| t.status == status).count(),
        })
        .collect();

    let missing_evidence = tasks
        .iter()
        .filter(|t| {
            matches!(t.status, AcceptanceStatus::Approved | AcceptanceStatus::InProgress)
                && !t.has_evidence()
        })
        .map(|t| t.id.clone())
        .collect();

    ReadinessSummary {
        total: tasks.len(),
        by_status,
        missing_evidence,
    }
}

/// User input for a new checklist record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceDraft {
    pub project_id: ProjectId,
    pub category: AcceptanceCategory,
    pub title: String,
    #[serde(default)]
    pub standard_ref: Option<String>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AcceptanceDraft {
    /// Fill in creation defaults: Pending, a TCVN reference, an unassigned
    /// inspector and a check date of `today`.
    pub fn into_task(
        self,
        id: AcceptanceTaskId,
        project_name: impl Into<String>,
        today: Date,
    ) -> AcceptanceTask {
        let mut task = AcceptanceTask::new(id, self.project_id, project_name, self.category, self.title);
        task.standard_ref = non_blank(self.standard_ref).unwrap_or_else(|| DEFAULT_STANDARD_REF.to_string());
        task.inspector =
            Some(non_blank(self.inspector).unwrap_or_else(|| UNASSIGNED_INSPECTOR.to_string()));
        task.notes = non_blank(self.notes);
        task.check_date = Some(dates::format_date(today));
        task
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
