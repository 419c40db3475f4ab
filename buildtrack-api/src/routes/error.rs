use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use buildtrack_core::CoreError;
use serde::Serialize;
use std::fmt;

use crate::domain::{
    AssistantError, CalendarError, InventoryError, ProjectError, QaqcError, StoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidTransition,
    InvalidDate,
    DuplicateTask,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Record store error: {:?}", err);
        Self::internal(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransition { .. } => {
                Self::conflict(err.to_string()).with_code(ErrorCode::InvalidTransition)
            }
            CoreError::InvalidDate(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidDate)
            }
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::ProjectNotFound(_) | ProjectError::TaskNotFound(_) => {
                Self::not_found(err.to_string())
            }
            ProjectError::DuplicateTask(_) => {
                Self::conflict(err.to_string()).with_code(ErrorCode::DuplicateTask)
            }
            ProjectError::Invalid(_) => Self::bad_request(err.to_string()),
            ProjectError::Store(e) => e.into(),
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::MaterialNotFound(_) => Self::not_found(err.to_string()),
            InventoryError::EmptyImport => Self::bad_request(err.to_string()),
            InventoryError::Store(e) => e.into(),
        }
    }
}

impl From<QaqcError> for ApiError {
    fn from(err: QaqcError) -> Self {
        match err {
            QaqcError::TaskNotFound(_) | QaqcError::ProjectNotFound(_) => {
                Self::not_found(err.to_string())
            }
            QaqcError::MissingTitle => Self::bad_request(err.to_string()),
            QaqcError::Transition(e) => e.into(),
            QaqcError::Store(e) => e.into(),
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::NoteNotFound(_) => Self::not_found(err.to_string()),
            CalendarError::EmptyNote => Self::bad_request(err.to_string()),
            CalendarError::InvalidDate(e) => e.into(),
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::ProjectNotFound(_) => Self::not_found(err.to_string()),
            AssistantError::Store(e) => e.into(),
        }
    }
}
