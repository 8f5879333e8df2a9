use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use dhanrakshak_core::market_data::{MutualFundNav, PriceRefreshResult};

#[derive(serde::Deserialize, Default)]
struct RefreshQuery {
    #[serde(default)]
    force: bool,
}

/// Refreshes every asset price. `?force=true` drops the cached NAV table first.
async fn refresh_prices(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RefreshQuery>,
) -> ApiResult<Json<PriceRefreshResult>> {
    if q.force {
        state.nav_cache.invalidate().await;
    }
    let result = state.price_refresh_service.refresh_all_prices().await?;
    Ok(Json(result))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_mutual_funds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<MutualFundNav>>> {
    let funds = state.nav_cache.search(&query.q).await?;
    Ok(Json(funds))
}

async fn get_mutual_fund(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MutualFundNav>> {
    state
        .nav_cache
        .get_nav(&code)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No NAV for scheme {}", code)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/refresh", post(refresh_prices))
        .route("/market/mutual-funds/search", get(search_mutual_funds))
        .route("/market/mutual-funds/{code}", get(get_mutual_fund))
}
