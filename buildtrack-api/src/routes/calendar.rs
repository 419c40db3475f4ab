use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use buildtrack_core::{
    calendar::{DayDetail, MonthIndex, ProjectFilter},
    dates,
    domain::CalendarNote,
    CoreError,
};
use serde::Deserialize;
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_month))
        .route("/days/:date", get(get_day))
        .route("/notes", get(list_notes).post(add_note))
        .route("/notes/:id/complete", put(complete_note))
        .route("/notes/:id", delete(delete_note))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    /// Defaults to the current month.
    pub year: Option<i32>,
    pub month: Option<u8>,
    #[serde(default)]
    pub project: ProjectFilter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(default)]
    pub project: ProjectFilter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteBody {
    pub date: String,
    pub content: String,
    pub reminder_time: Option<String>,
}

#[instrument(name = "GET /calendar", skip(app_state))]
async fn get_month(
    State(app_state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthIndex>, ApiError> {
    let today = app_state.today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(u8::from(today.month()));

    let projects = app_state.projects.list_projects().await?;
    let notes = app_state.notes().await;
    let index = MonthIndex::build(year, month, &projects, &notes, &query.project, today)?;
    Ok(Json(index))
}

#[instrument(name = "GET /calendar/days/:date", skip(app_state))]
async fn get_day(
    State(app_state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<DayDetail>, ApiError> {
    let day = dates::parse_date(&date).ok_or(CoreError::InvalidDate(date))?;

    let projects = app_state.projects.list_projects().await?;
    let notes = app_state.notes().await;
    Ok(Json(DayDetail::build(day, &projects, &notes, &query.project)))
}

#[instrument(name = "GET /calendar/notes", skip(app_state))]
async fn list_notes(State(app_state): State<AppState>) -> Json<Vec<CalendarNote>> {
    Json(app_state.notes().await)
}

#[instrument(name = "POST /calendar/notes", skip(app_state))]
async fn add_note(
    State(app_state): State<AppState>,
    Json(body): Json<NoteBody>,
) -> Result<(StatusCode, Json<CalendarNote>), ApiError> {
    let note = app_state
        .add_note(&body.date, &body.content, body.reminder_time)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[instrument(name = "PUT /calendar/notes/:id/complete", skip(app_state))]
async fn complete_note(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CalendarNote>, ApiError> {
    Ok(Json(app_state.complete_note(&id).await?))
}

#[instrument(name = "DELETE /calendar/notes/:id", skip(app_state))]
async fn delete_note(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state.delete_note(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
