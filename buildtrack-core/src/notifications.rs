//! Alert feed derived from projects, task deadlines and note reminders.

use std::cmp::Reverse;

use time::{macros::format_description, OffsetDateTime};

use crate::{
    dates,
    domain::{CalendarNote, Notification, Project, ProjectStatus, Severity},
};

/// Tasks ending within this many days (inclusive) raise a warning.
pub const DUE_SOON_DAYS: i64 = 3;

/// Build the notification feed as seen at `now`.
///
/// Deterministic for the same inputs and `now`. Critical alerts come first,
/// then everything by timestamp, newest first.
pub fn generate_notifications(
    projects: &[Project],
    notes: &[CalendarNote],
    now: OffsetDateTime,
) -> Vec<Notification> {
    let today = now.date();
    let mut feed = Vec::new();

    for project in projects {
        if project.status == ProjectStatus::Delayed {
            feed.push(Notification {
                id: format!("proj-delayed-{}", project.id),
                title: "Project delayed".to_string(),
                message: format!("Project \"{}\" is behind schedule.", project.name),
                severity: Severity::Critical,
                timestamp: now,
                project_id: Some(project.id.clone()),
            });
        }

        for task in &project.tasks {
            if task.status == ProjectStatus::Completed {
                continue;
            }
            let Some(end) = task.end() else {
                continue;
            };

            let diff_days = dates::days_between(today, end);
            if diff_days < 0 {
                feed.push(Notification {
                    id: format!("task-overdue-{}", task.id),
                    title: "Task overdue".to_string(),
                    message: format!(
                        "Task \"{}\" (project: {}) is {} day(s) overdue.",
                        task.name,
                        project.name,
                        diff_days.abs()
                    ),
                    severity: Severity::Critical,
                    timestamp: now,
                    project_id: Some(project.id.clone()),
                });
            } else if diff_days <= DUE_SOON_DAYS {
                let when = if diff_days == 0 {
                    "today".to_string()
                } else {
                    format!("in {diff_days} day(s)")
                };
                feed.push(Notification {
                    id: format!("task-soon-{}", task.id),
                    title: "Task due soon".to_string(),
                    message: format!(
                        "Task \"{}\" (project: {}) is due {when}.",
                        task.name, project.name
                    ),
                    severity: Severity::Warning,
                    timestamp: now,
                    project_id: Some(project.id.clone()),
                });
            }
        }
    }

    let offset = now.offset();
    for note in notes.iter().filter(|n| !n.is_completed) {
        let Some(reminder) = note.reminder(offset) else {
            continue;
        };
        if reminder.date() != today && reminder >= now {
            continue;
        }

        let at = reminder
            .format(format_description!("[hour]:[minute]"))
            .unwrap_or_default();
        feed.push(Notification {
            id: format!("note-reminder-{}", note.id),
            title: "Note reminder".to_string(),
            message: format!("Reminder: \"{}\" at {at}.", note.content),
            severity: Severity::Info,
            timestamp: reminder,
            project_id: None,
        });
    }

    feed.sort_by_key(|n| (!n.severity.is_critical(), Reverse(n.timestamp)));
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-03-11 10:00 +7);

    fn ids(feed: &[Notification]) -> Vec<&str> {
        feed.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn delayed_project_and_overdue_task_are_critical() {
        let projects = vec![Project::new("p1", "HN-01", "Hanoi Tower")
            .with_status(ProjectStatus::Delayed)
            .with_tasks(vec![Task::new("t1", "Slab", "2024-03-01", "2024-03-08")])];

        let feed = generate_notifications(&projects, &[], NOW);

        assert_eq!(ids(&feed), vec!["proj-delayed-p1", "task-overdue-t1"]);
        assert!(feed.iter().all(|n| n.severity == Severity::Critical));
        assert!(feed[1].message.contains("3 day(s) overdue"));
        assert_eq!(feed[1].project_id.as_ref().map(|id| id.as_str()), Some("p1"));
    }

    #[test]
    fn task_ending_today_warns_today() {
        let projects = vec![Project::new("p1", "HN-01", "Hanoi Tower")
            .with_tasks(vec![Task::new("t1", "Walls", "2024-03-01", "2024-03-11")])];

        let feed = generate_notifications(&projects, &[], NOW);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].severity, Severity::Warning);
        assert!(feed[0].message.ends_with("is due today."));
    }

    #[test]
    fn due_soon_window_is_three_days() {
        let projects = vec![Project::new("p1", "HN-01", "Hanoi Tower").with_tasks(vec![
            Task::new("t3", "Paint", "2024-03-01", "2024-03-14"),
            Task::new("t4", "Tiles", "2024-03-01", "2024-03-15"),
            Task::new("done", "Survey", "2024-03-01", "2024-03-01")
                .with_status(ProjectStatus::Completed),
            Task::new("bad", "Unknown", "2024-03-01", "later"),
        ])];

        let feed = generate_notifications(&projects, &[], NOW);

        assert_eq!(ids(&feed), vec!["task-soon-t3"]);
        assert!(feed[0].message.ends_with("is due in 3 day(s)."));
    }

    #[test]
    fn reminders_today_or_past_are_reported() {
        let notes = vec![
            CalendarNote::new("later-today", "2024-03-11", "Pour concrete").with_reminder_at("16:30"),
            CalendarNote::new("past", "2024-03-09", "Call supplier").with_reminder_at("08:00"),
            CalendarNote::new("future", "2024-03-12", "Audit").with_reminder_at("08:00"),
            CalendarNote::new("done", "2024-03-09", "Old").with_reminder_at("08:00").completed(),
            CalendarNote::new("no-reminder", "2024-03-11", "Plain note"),
            CalendarNote::new("garbled", "2024-03-11", "?").with_reminder("whenever"),
        ];

        let feed = generate_notifications(&[], &notes, NOW);

        assert_eq!(ids(&feed), vec!["note-reminder-later-today", "note-reminder-past"]);
        assert_eq!(feed[0].timestamp, datetime!(2024-03-11 16:30 +7));
        assert!(feed[0].message.contains("at 16:30"));
        assert!(feed.iter().all(|n| n.project_id.is_none()));
    }

    #[test]
    fn critical_first_then_newest_first() {
        let projects = vec![Project::new("p1", "HN-01", "Hanoi Tower").with_tasks(vec![
            Task::new("soon", "Roof", "2024-03-01", "2024-03-12"),
            Task::new("late", "Slab", "2024-03-01", "2024-03-10"),
        ])];
        let notes = vec![
            CalendarNote::new("n-old", "2024-03-01", "Old").with_reminder_at("09:00"),
            CalendarNote::new("n-new", "2024-03-11", "New").with_reminder_at("23:00"),
        ];

        let feed = generate_notifications(&projects, &notes, NOW);

        assert_eq!(
            ids(&feed),
            vec![
                "task-overdue-late",
                "note-reminder-n-new",
                "task-soon-soon",
                "note-reminder-n-old",
            ]
        );
    }

    #[test]
    fn criticals_across_projects_lead_in_either_input_order() {
        let warning_first = vec![
            Project::new("p2", "HCM-02", "Riverside Villa").with_tasks(vec![
                Task::new("soon", "Roof", "2024-03-01", "2024-03-12"),
                Task::new("late", "Slab", "2024-03-01", "2024-03-05"),
            ]),
            Project::new("p1", "HN-01", "Hanoi Tower").with_status(ProjectStatus::Delayed),
        ];
        let notes = vec![CalendarNote::new("n1", "2024-03-11", "Site walk").with_reminder_at("11:00")];

        let mut reversed = warning_first.clone();
        reversed.reverse();

        for projects in [warning_first, reversed] {
            let feed = generate_notifications(&projects, &notes, NOW);

            assert_eq!(feed.len(), 4);
            let mut critical: Vec<&str> = ids(&feed[..2]);
            critical.sort_unstable();
            assert_eq!(critical, vec!["proj-delayed-p1", "task-overdue-late"]);
            assert!(feed[..2].iter().all(|n| n.severity == Severity::Critical));
            assert!(feed[2..].iter().all(|n| n.severity != Severity::Critical));
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let projects = vec![Project::new("p1", "HN-01", "Hanoi Tower")
            .with_status(ProjectStatus::Delayed)
            .with_tasks(vec![
                Task::new("t1", "Slab", "2024-03-01", "2024-03-08"),
                Task::new("t2", "Roof", "2024-03-01", "2024-03-13"),
            ])];
        let notes = vec![CalendarNote::new("n1", "2024-03-11", "Check").with_reminder_at("07:00")];

        let first = generate_notifications(&projects, &notes, NOW);
        let second = generate_notifications(&projects, &notes, NOW);
        assert_eq!(first, second);
    }
}
