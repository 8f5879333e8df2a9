use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dhanrakshak_core::sync::DataExport;

async fn export_data(State(state): State<Arc<AppState>>) -> ApiResult<Json<DataExport>> {
    Ok(Json(state.data_transfer_service.export_data()?))
}

/// Replaces all local data, settings included, with the uploaded export.
async fn import_data(
    State(state): State<Arc<AppState>>,
    Json(data): Json<DataExport>,
) -> ApiResult<StatusCode> {
    state.data_transfer_service.import_data(data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/data/export", get(export_data))
        .route("/data/import", post(import_data))
}
