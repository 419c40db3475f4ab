use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use buildtrack_core::{
    domain::PcccMaterial,
    inventory::{split_import_lines, ImportBatch, MaterialFilter, RawRow, WarehouseStats},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{AdjustResponse, ImportResultResponse},
    app_state::AppState,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/materials", get(list_materials).post(save_material))
        .route("/materials/:id", delete(delete_material))
        .route("/materials/:id/adjust", post(adjust_stock))
        .route("/stats", get(get_stats))
        .route("/import/preview", post(preview_import))
        .route("/import", post(confirm_import))
}

#[derive(Debug, Deserialize)]
pub struct AdjustBody {
    pub delta: i64,
}

/// Import input: raw delimited text with a header line, or rows already split
/// by the client.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportPreviewBody {
    Text { text: String },
    Rows { rows: Vec<RawRow> },
}

#[derive(Debug, Deserialize)]
pub struct ImportConfirmBody {
    pub records: Vec<PcccMaterial>,
}

#[instrument(name = "GET /pccc/materials", skip(app_state))]
async fn list_materials(
    State(app_state): State<AppState>,
    Query(filter): Query<MaterialFilter>,
) -> Result<Json<Vec<PcccMaterial>>, ApiError> {
    let materials = app_state
        .inventory
        .list_materials(&filter, app_state.today())
        .await?;
    Ok(Json(materials))
}

#[instrument(name = "POST /pccc/materials", skip(app_state, material), fields(material_id = %material.id))]
async fn save_material(
    State(app_state): State<AppState>,
    Json(material): Json<PcccMaterial>,
) -> Result<Json<PcccMaterial>, ApiError> {
    let saved = app_state
        .inventory
        .save_material(material, app_state.today())
        .await?;
    Ok(Json(saved))
}

#[instrument(name = "DELETE /pccc/materials/:id", skip(app_state))]
async fn delete_material(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state.inventory.delete_material(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "POST /pccc/materials/:id/adjust", skip(app_state))]
async fn adjust_stock(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AdjustBody>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let outcome = app_state
        .inventory
        .adjust_stock(&id, body.delta, app_state.today())
        .await?;
    Ok(Json(outcome.into()))
}

#[instrument(name = "GET /pccc/stats", skip(app_state))]
async fn get_stats(State(app_state): State<AppState>) -> Result<Json<WarehouseStats>, ApiError> {
    let stats = app_state
        .inventory
        .warehouse_stats(app_state.today())
        .await?;
    Ok(Json(stats))
}

#[instrument(name = "POST /pccc/import/preview", skip(app_state, body))]
async fn preview_import(
    State(app_state): State<AppState>,
    Json(body): Json<ImportPreviewBody>,
) -> Json<ImportBatch> {
    let rows = match body {
        ImportPreviewBody::Text { text } => split_import_lines(&text),
        ImportPreviewBody::Rows { rows } => rows,
    };
    Json(app_state.inventory.preview_import(&rows, app_state.today()))
}

#[instrument(name = "POST /pccc/import", skip(app_state, body), fields(count = body.records.len()))]
async fn confirm_import(
    State(app_state): State<AppState>,
    Json(body): Json<ImportConfirmBody>,
) -> Result<Json<ImportResultResponse>, ApiError> {
    let imported = app_state
        .inventory
        .confirm_import(body.records, app_state.today())
        .await?;
    Ok(Json(ImportResultResponse { imported }))
}
