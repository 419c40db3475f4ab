use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use buildtrack_core::domain::{Project, Task};
use tracing::instrument;

use crate::{
    adapters::inbound::http::TimelineResponse, app_state::AppState,
    domain::ports::inbound::TaskPatch,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(save_project))
        .route("/:id", get(get_project).delete(delete_project))
        .route("/:id/timeline", get(get_timeline))
        .route("/:id/tasks", post(add_task))
        .route("/:id/tasks/:task_id", put(update_task).delete(remove_task))
}

#[instrument(name = "GET /projects", skip(app_state))]
async fn list_projects(State(app_state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(app_state.projects.list_projects().await?))
}

#[instrument(name = "POST /projects", skip(app_state, project), fields(project_id = %project.id))]
async fn save_project(
    State(app_state): State<AppState>,
    Json(project): Json<Project>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(app_state.projects.save_project(project).await?))
}

#[instrument(name = "GET /projects/:id", skip(app_state))]
async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(app_state.projects.get_project(&id).await?))
}

#[instrument(name = "DELETE /projects/:id", skip(app_state))]
async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state.projects.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /projects/:id/timeline", skip(app_state))]
async fn get_timeline(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let project = app_state.projects.get_project(&id).await?;
    Ok(Json(TimelineResponse::new(&project, app_state.today())))
}

#[instrument(name = "POST /projects/:id/tasks", skip(app_state, task))]
async fn add_task(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(task): Json<Task>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(app_state.projects.add_task(&id, task).await?))
}

#[instrument(name = "PUT /projects/:id/tasks/:task_id", skip(app_state))]
async fn update_task(
    State(app_state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(
        app_state.projects.update_task(&id, &task_id, patch).await?,
    ))
}

#[instrument(name = "DELETE /projects/:id/tasks/:task_id", skip(app_state))]
async fn remove_task(
    State(app_state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(app_state.projects.remove_task(&id, &task_id).await?))
}
