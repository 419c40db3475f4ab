use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{adapters::inbound::http::AssistantReply, app_state::AppState};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/projects/:id/risks", get(project_risks))
        .route("/suggest-tasks", post(suggest_tasks))
        .route("/pccc", get(pccc_stock))
        .route("/qaqc", get(qaqc_review))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    pub message: String,
    /// The project the user is looking at, if any.
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestTasksBody {
    pub description: String,
}

#[instrument(name = "POST /assistant/chat", skip(app_state, body))]
async fn chat(
    State(app_state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<AssistantReply>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::bad_request("message is required"));
    }
    let reply = app_state
        .assistant
        .chat(&body.message, body.project_id.as_deref())
        .await?;
    Ok(Json(reply.into()))
}

#[instrument(name = "GET /assistant/projects/:id/risks", skip(app_state))]
async fn project_risks(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssistantReply>, ApiError> {
    let reply = app_state.assistant.analyze_project_risks(&id).await?;
    Ok(Json(reply.into()))
}

#[instrument(name = "POST /assistant/suggest-tasks", skip(app_state, body))]
async fn suggest_tasks(
    State(app_state): State<AppState>,
    Json(body): Json<SuggestTasksBody>,
) -> Result<Json<AssistantReply>, ApiError> {
    let reply = app_state.assistant.suggest_tasks(&body.description).await?;
    Ok(Json(reply.into()))
}

#[instrument(name = "GET /assistant/pccc", skip(app_state))]
async fn pccc_stock(State(app_state): State<AppState>) -> Result<Json<AssistantReply>, ApiError> {
    let reply = app_state
        .assistant
        .analyze_pccc_stock(app_state.today())
        .await?;
    Ok(Json(reply.into()))
}

#[instrument(name = "GET /assistant/qaqc", skip(app_state))]
async fn qaqc_review(State(app_state): State<AppState>) -> Result<Json<AssistantReply>, ApiError> {
    let reply = app_state.assistant.analyze_qaqc().await?;
    Ok(Json(reply.into()))
}
