//! Portfolio rollups for the dashboard.

use serde::Serialize;
use time::{Date, Month};

use crate::{
    aggregation::{self, rounded_mean},
    dates,
    domain::{Project, ProjectId, ProjectStatus},
};

pub const TREND_MONTHS: u32 = 6;

/// Dashboard order of the status buckets.
const STATUS_ORDER: [ProjectStatus; 5] = [
    ProjectStatus::InProgress,
    ProjectStatus::Completed,
    ProjectStatus::Delayed,
    ProjectStatus::Planning,
    ProjectStatus::OnHold,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}

/// Projects per status. Empty buckets are left out.
pub fn status_distribution(projects: &[Project]) -> Vec<StatusCount> {
    STATUS_ORDER
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: projects.iter().filter(|p| p.status == status).count(),
        })
        .filter(|bucket| bucket.count > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub project_id: ProjectId,
    pub code: String,
    pub name: String,
    pub paid: f64,
    pub pending: f64,
    pub remaining: f64,
    pub budget: f64,
}

/// Spent, committed and left-over money for each project.
pub fn cash_flow(projects: &[Project]) -> Vec<CashFlow> {
    projects
        .iter()
        .map(|project| {
            let pending = aggregation::financial_summary(project).pending_amount;
            CashFlow {
                project_id: project.id.clone(),
                code: project.code.clone(),
                name: project.name.clone(),
                paid: project.spent,
                pending,
                remaining: (project.budget - project.spent - pending).max(0.0),
                budget: project.budget,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub year: i32,
    pub month: u8,
    /// `YYYY-MM`
    pub label: String,
    pub progress: u8,
}

/// Average task progress over the last six months, oldest first.
///
/// Cumulative: a month averages every task whose end date falls on or before
/// the month's last day. Tasks with an unparsable end date never count.
pub fn progress_trend(projects: &[Project], today: Date) -> Vec<TrendPoint> {
    let ends: Vec<(Date, u8)> = projects
        .iter()
        .flat_map(|p| p.tasks.iter())
        .filter_map(|t| t.end().map(|end| (end, t.progress)))
        .collect();

    (0..TREND_MONTHS)
        .rev()
        .map(|back| dates::months_back(today.year(), today.month(), back))
        .map(|(year, month)| {
            let month_end = dates::last_of_month(year, month).unwrap_or(Date::MAX);
            let progress = rounded_mean(
                ends.iter()
                    .filter(|(end, _)| *end <= month_end)
                    .map(|(_, progress)| *progress),
            );
            trend_point(year, month, progress)
        })
        .collect()
}

fn trend_point(year: i32, month: Month, progress: u8) -> TrendPoint {
    let month = u8::from(month);
    TrendPoint {
        year,
        month,
        label: format!("{year:04}-{month:02}"),
        progress,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub project_count: usize,
    pub worker_count: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub delayed_projects: usize,
}

impl Kpis {
    pub fn from_projects(projects: &[Project]) -> Self {
        Self {
            project_count: projects.len(),
            worker_count: projects.iter().map(|p| p.workers.len()).sum(),
            total_budget: projects.iter().map(|p| p.budget).sum(),
            total_spent: projects.iter().map(|p| p.spent).sum(),
            delayed_projects: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Delayed)
                .count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: Kpis,
    pub status_distribution: Vec<StatusCount>,
    pub cash_flow: Vec<CashFlow>,
    pub progress_trend: Vec<TrendPoint>,
}

impl DashboardSnapshot {
    pub fn build(projects: &[Project], today: Date) -> Self {
        Self {
            kpis: Kpis::from_projects(projects),
            status_distribution: status_distribution(projects),
            cash_flow: cash_flow(projects),
            progress_trend: progress_trend(projects, today),
        }
    }
}
