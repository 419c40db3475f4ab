use axum::{extract::State, routing::get, Json, Router};
use buildtrack_core::metrics::DashboardSnapshot;
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

#[instrument(name = "GET /dashboard", skip(app_state))]
async fn get_dashboard(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let projects = app_state.projects.list_projects().await?;
    Ok(Json(DashboardSnapshot::build(&projects, app_state.today())))
}
