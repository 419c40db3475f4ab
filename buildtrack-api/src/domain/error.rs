use buildtrack_core::CoreError;
use thiserror::Error;

use super::ports::outbound::Collection;

/// Errors raised by a [`RecordStore`](super::ports::outbound::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid {collection} record: {reason}")]
    InvalidRecord {
        collection: Collection,
        reason: String,
    },
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn invalid(collection: Collection, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            collection,
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by a [`CompletionClient`](super::ports::outbound::CompletionClient).
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no completion provider is configured")]
    NotConfigured,
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion provider returned no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("task already exists: {0}")]
    DuplicateTask(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("material not found: {0}")]
    MaterialNotFound(String),
    #[error("import contains no valid rows")]
    EmptyImport,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum QaqcError {
    #[error("acceptance record not found: {0}")]
    TaskNotFound(String),
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("title is required")]
    MissingTitle,
    #[error(transparent)]
    Transition(#[from] CoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("note content is required")]
    EmptyNote,
    #[error(transparent)]
    InvalidDate(#[from] CoreError),
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
