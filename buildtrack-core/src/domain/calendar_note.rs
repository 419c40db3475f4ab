use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use super::NoteId;
use crate::dates;

/// A user annotation pinned to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarNote {
    pub id: NoteId,
    /// `YYYY-MM-DD`
    pub date: String,
    pub content: String,
    /// `YYYY-MM-DDTHH:MM[:SS]` in site-local time, or RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl CalendarNote {
    pub fn new(id: impl Into<NoteId>, date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            content: content.into(),
            reminder_time: None,
            is_completed: false,
        }
    }

    /// Attach a reminder at `HH:MM` on the note's own day.
    pub fn with_reminder_at(mut self, hh_mm: &str) -> Self {
        self.reminder_time = Some(format!("{}T{}:00", self.date, hh_mm));
        self
    }

    pub fn with_reminder(mut self, reminder_time: impl Into<String>) -> Self {
        self.reminder_time = Some(reminder_time.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    pub fn reminder(&self, offset: UtcOffset) -> Option<OffsetDateTime> {
        self.reminder_time
            .as_deref()
            .and_then(|value| dates::parse_reminder(value, offset))
    }
}
