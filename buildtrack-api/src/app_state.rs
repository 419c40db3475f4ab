use std::sync::Arc;

use buildtrack_core::{
    dates,
    domain::{CalendarNote, NoteId},
    CoreError,
};
use time::{Date, OffsetDateTime, UtcOffset};
use tokio::sync::RwLock;

use crate::domain::{
    ports::inbound::{AssistantService, InventoryService, ProjectService, QaqcService},
    CalendarError,
};

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectService>,
    pub inventory: Arc<dyn InventoryService>,
    pub qaqc: Arc<dyn QaqcService>,
    pub assistant: Arc<dyn AssistantService>,
    notes: Arc<RwLock<Vec<CalendarNote>>>,
    utc_offset: UtcOffset,
}

impl AppState {
    pub fn new(
        projects: Arc<dyn ProjectService>,
        inventory: Arc<dyn InventoryService>,
        qaqc: Arc<dyn QaqcService>,
        assistant: Arc<dyn AssistantService>,
        notes: Vec<CalendarNote>,
        utc_offset: UtcOffset,
    ) -> Self {
        Self {
            projects,
            inventory,
            qaqc,
            assistant,
            notes: Arc::new(RwLock::new(notes)),
            utc_offset,
        }
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.utc_offset)
    }

    pub fn today(&self) -> Date {
        self.now().date()
    }

    pub async fn notes(&self) -> Vec<CalendarNote> {
        self.notes.read().await.clone()
    }

    pub async fn add_note(
        &self,
        date: &str,
        content: &str,
        reminder_time: Option<String>,
    ) -> Result<CalendarNote, CalendarError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CalendarError::EmptyNote);
        }
        let day =
            dates::parse_date(date).ok_or_else(|| CoreError::InvalidDate(date.to_string()))?;

        let reminder_time = reminder_time.filter(|r| !r.trim().is_empty());
        if let Some(reminder) = reminder_time.as_deref() {
            if dates::parse_reminder(reminder, self.utc_offset).is_none() {
                return Err(CoreError::InvalidDate(reminder.to_string()).into());
            }
        }

        let mut note = CalendarNote::new(
            NoteId::new(format!("note-{}", self.now().unix_timestamp_nanos() / 1_000_000)),
            dates::format_date(day),
            content,
        );
        note.reminder_time = reminder_time;

        let mut notes = self.notes.write().await;
        while notes.iter().any(|n| n.id == note.id) {
            note.id = NoteId::new(format!("{}-{}", note.id, notes.len()));
        }
        notes.insert(0, note.clone());
        tracing::debug!(note_id = %note.id, date = %note.date, "Added calendar note");
        Ok(note)
    }

    pub async fn complete_note(&self, note_id: &str) -> Result<CalendarNote, CalendarError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id.as_str() == note_id)
            .ok_or_else(|| CalendarError::NoteNotFound(note_id.to_string()))?;
        note.is_completed = true;
        Ok(note.clone())
    }

    pub async fn delete_note(&self, note_id: &str) -> Result<(), CalendarError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id.as_str() != note_id);
        if notes.len() == before {
            return Err(CalendarError::NoteNotFound(note_id.to_string()));
        }
        Ok(())
    }
}
