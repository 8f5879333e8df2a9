use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use dhanrakshak_core::sync::{CloudSyncServiceTrait, SyncStatus};

fn cloud_sync(state: &AppState) -> ApiResult<&Arc<dyn CloudSyncServiceTrait>> {
    state
        .cloud_sync_service
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Cloud sync is not configured".to_string()))
}

async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncStatus>> {
    Ok(Json(cloud_sync(&state)?.status()))
}

async fn upload(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncStatus>> {
    let sync = cloud_sync(&state)?;
    sync.upload_to_cloud().await?;
    Ok(Json(sync.status()))
}

async fn download(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncStatus>> {
    let sync = cloud_sync(&state)?;
    sync.download_from_cloud().await?;
    Ok(Json(sync.status()))
}

#[derive(serde::Deserialize)]
struct AutoSyncBody {
    enabled: bool,
}

async fn set_auto_sync(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AutoSyncBody>,
) -> ApiResult<Json<SyncStatus>> {
    let sync = cloud_sync(&state)?;
    sync.set_auto_sync(body.enabled);
    Ok(Json(sync.status()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync/status", get(get_status))
        .route("/sync/upload", post(upload))
        .route("/sync/download", post(download))
        .route("/sync/auto", put(set_auto_sync))
}
