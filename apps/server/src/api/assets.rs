use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use dhanrakshak_core::assets::{Asset, NewAsset, PortfolioSummary};

async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Asset>>> {
    Ok(Json(state.asset_service.get_assets()))
}

async fn create_asset(
    State(state): State<Arc<AppState>>,
    Json(asset): Json<NewAsset>,
) -> ApiResult<Json<Asset>> {
    let created = state.asset_service.create_asset(asset).await?;
    Ok(Json(created))
}

async fn update_asset(
    State(state): State<Arc<AppState>>,
    Json(asset): Json<Asset>,
) -> ApiResult<Json<Asset>> {
    let updated = state.asset_service.update_asset(asset).await?;
    Ok(Json(updated))
}

#[derive(serde::Deserialize)]
struct PriceBody {
    price: f64,
}

async fn update_price(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<PriceBody>,
) -> ApiResult<Json<Asset>> {
    let asset = state.asset_service.update_price(id, body.price).await?;
    Ok(Json(asset))
}

/// Deletes locally, then removes the cloud copy when cloud sync is configured.
/// A failed cloud delete is logged and does not fail the request.
async fn delete_asset(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.asset_service.delete_asset(id).await?;
    if let Some(sync) = &state.cloud_sync_service {
        if let Err(e) = sync.delete_asset_from_cloud(id).await {
            tracing::warn!("Could not delete asset {} from cloud: {}", id, e);
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn portfolio_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSummary>> {
    Ok(Json(state.asset_service.get_portfolio_summary()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/assets",
            get(list_assets).post(create_asset).put(update_asset),
        )
        .route("/assets/summary", get(portfolio_summary))
        .route("/assets/{id}", delete(delete_asset))
        .route("/assets/{id}/price", put(update_price))
}
