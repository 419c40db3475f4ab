use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use buildtrack_core::{
    domain::{AcceptanceStatus, AcceptanceTask},
    qaqc::{AcceptanceDraft, AcceptanceFilter, CategoryGroup, ReadinessSummary},
};
use serde::Deserialize;
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", delete(delete_task))
        .route("/tasks/:id/status", put(set_status))
        .route("/groups", get(get_groups))
        .route("/readiness", get(get_readiness))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: AcceptanceStatus,
}

#[instrument(name = "GET /qaqc/tasks", skip(app_state))]
async fn list_tasks(
    State(app_state): State<AppState>,
    Query(filter): Query<AcceptanceFilter>,
) -> Result<Json<Vec<AcceptanceTask>>, ApiError> {
    Ok(Json(app_state.qaqc.list_tasks(&filter).await?))
}

#[instrument(name = "POST /qaqc/tasks", skip(app_state))]
async fn create_task(
    State(app_state): State<AppState>,
    Json(draft): Json<AcceptanceDraft>,
) -> Result<(StatusCode, Json<AcceptanceTask>), ApiError> {
    let task = app_state
        .qaqc
        .create_task(draft, app_state.today())
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(name = "PUT /qaqc/tasks/:id/status", skip(app_state))]
async fn set_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<AcceptanceTask>, ApiError> {
    Ok(Json(app_state.qaqc.set_status(&id, body.status).await?))
}

#[instrument(name = "DELETE /qaqc/tasks/:id", skip(app_state))]
async fn delete_task(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state.qaqc.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /qaqc/groups", skip(app_state))]
async fn get_groups(
    State(app_state): State<AppState>,
    Query(filter): Query<AcceptanceFilter>,
) -> Result<Json<Vec<CategoryGroup>>, ApiError> {
    Ok(Json(app_state.qaqc.grouped(&filter).await?))
}

#[instrument(name = "GET /qaqc/readiness", skip(app_state))]
async fn get_readiness(
    State(app_state): State<AppState>,
) -> Result<Json<ReadinessSummary>, ApiError> {
    Ok(Json(app_state.qaqc.readiness().await?))
}
