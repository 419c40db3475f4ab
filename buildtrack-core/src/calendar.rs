//! Day-by-day index of tasks and notes for a calendar month.

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    dates,
    domain::{CalendarNote, Project, ProjectId, Task},
    CoreError,
};

/// Which projects contribute tasks to the calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Project(ProjectId),
}

impl ProjectFilter {
    pub fn includes(&self, project_id: &ProjectId) -> bool {
        match self {
            Self::All => true,
            Self::Project(id) => id == project_id,
        }
    }
}

impl FromStr for ProjectFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Project(ProjectId::new(s)))
        }
    }
}

impl<'de> Deserialize<'de> for ProjectFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A task together with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTask {
    pub project_id: ProjectId,
    pub project_code: String,
    pub project_name: String,
    #[serde(flatten)]
    pub task: Task,
}

pub fn flatten_tasks(projects: &[Project], filter: &ProjectFilter) -> Vec<CalendarTask> {
    projects
        .iter()
        .filter(|project| filter.includes(&project.id))
        .flat_map(|project| {
            project.tasks.iter().map(|task| CalendarTask {
                project_id: project.id.clone(),
                project_code: project.code.clone(),
                project_name: project.name.clone(),
                task: task.clone(),
            })
        })
        .collect()
}

/// Tasks whose `[start_date, end_date]` range contains `date_key`.
///
/// Dates are compared as ISO strings. Tasks that start on the day come first;
/// otherwise input order is kept.
pub fn tasks_on_day<'a>(date_key: &str, tasks: &'a [CalendarTask]) -> Vec<&'a CalendarTask> {
    let mut active: Vec<&CalendarTask> = tasks
        .iter()
        .filter(|t| date_key >= t.task.start_date.as_str() && date_key <= t.task.end_date.as_str())
        .collect();
    active.sort_by_key(|t| t.task.start_date != date_key);
    active
}

pub fn notes_on_day<'a>(date_key: &str, notes: &'a [CalendarNote]) -> Vec<&'a CalendarNote> {
    notes.iter().filter(|n| n.date == date_key).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: String,
    pub day: u8,
    pub is_today: bool,
    pub tasks: Vec<CalendarTask>,
    pub notes: Vec<CalendarNote>,
}

/// One month of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthIndex {
    pub year: i32,
    pub month: u8,
    /// Empty cells before day 1 in a Monday-first week.
    pub leading_blanks: u8,
    pub days: Vec<DayBucket>,
}

impl MonthIndex {
    pub fn build(
        year: i32,
        month: u8,
        projects: &[Project],
        notes: &[CalendarNote],
        filter: &ProjectFilter,
        today: Date,
    ) -> Result<Self, CoreError> {
        let month_enum = Month::try_from(month)
            .map_err(|_| CoreError::InvalidDate(format!("{year}-{month:02}")))?;
        let first = dates::first_of_month(year, month_enum)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year}-{month:02}")))?;

        let tasks = flatten_tasks(projects, filter);
        let today_key = dates::format_date(today);

        let days = (1..=dates::days_in_month(year, month_enum))
            .filter_map(|day| Date::from_calendar_date(year, month_enum, day).ok())
            .map(|date| {
                let key = dates::format_date(date);
                DayBucket {
                    is_today: key == today_key,
                    day: date.day(),
                    tasks: tasks_on_day(&key, &tasks).into_iter().cloned().collect(),
                    notes: notes_on_day(&key, notes).into_iter().cloned().collect(),
                    date: key,
                }
            })
            .collect();

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().number_days_from_monday(),
            days,
        })
    }
}

/// Everything shown when a single day is opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub date: String,
    pub tasks: Vec<CalendarTask>,
    pub notes: Vec<CalendarNote>,
}

impl DayDetail {
    pub fn build(
        date: Date,
        projects: &[Project],
        notes: &[CalendarNote],
        filter: &ProjectFilter,
    ) -> Self {
        let key = dates::format_date(date);
        let tasks = flatten_tasks(projects, filter);

        Self {
            tasks: tasks_on_day(&key, &tasks).into_iter().cloned().collect(),
            notes: notes_on_day(&key, notes).into_iter().cloned().collect(),
            date: key,
        }
    }
}
