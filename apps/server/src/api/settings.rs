use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use dhanrakshak_core::settings::{SettingsUpdate, UserSettings};

async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<UserSettings>> {
    Ok(Json(state.settings_service.get_settings()))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<UserSettings>> {
    let s = state.settings_service.update_settings(update).await?;
    Ok(Json(s))
}

async fn toggle_dark_mode(State(state): State<Arc<AppState>>) -> ApiResult<Json<UserSettings>> {
    let s = state.settings_service.toggle_dark_mode().await?;
    Ok(Json(s))
}

#[derive(serde::Deserialize)]
struct ValueBody {
    value: f64,
}

async fn set_monthly_budget(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValueBody>,
) -> ApiResult<Json<UserSettings>> {
    let s = state.settings_service.set_monthly_budget(body.value).await?;
    Ok(Json(s))
}

async fn set_savings_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValueBody>,
) -> ApiResult<Json<UserSettings>> {
    let s = state.settings_service.set_savings_goal(body.value).await?;
    Ok(Json(s))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/settings/dark-mode/toggle", post(toggle_dark_mode))
        .route("/settings/monthly-budget", put(set_monthly_budget))
        .route("/settings/savings-goal", put(set_savings_goal))
}
