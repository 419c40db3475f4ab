use axum::{extract::State, routing::get, Json, Router};
use buildtrack_core::{domain::Notification, notifications::generate_notifications};
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_notifications))
}

#[instrument(name = "GET /notifications", skip(app_state))]
async fn get_notifications(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let projects = app_state.projects.list_projects().await?;
    let notes = app_state.notes().await;

    let feed = generate_notifications(&projects, &notes, app_state.now());
    tracing::debug!("Generated {} notifications", feed.len());
    Ok(Json(feed))
}
