use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use dhanrakshak_core::goals::{Goal, GoalSummary, NewGoal};

async fn get_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.get_goals()))
}

async fn get_upcoming_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.get_upcoming_goals()))
}

async fn get_goal_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<GoalSummary>> {
    Ok(Json(state.goal_service.get_summary()))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.create_goal(goal).await?;
    Ok(Json(g))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<Goal>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.update_goal(goal).await?;
    Ok(Json(g))
}

async fn delete_goal(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_goal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
struct AmountBody {
    amount: f64,
}

async fn add_to_goal(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<AmountBody>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.add_to_goal(id, body.amount).await?;
    Ok(Json(g))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal).put(update_goal))
        .route("/goals/upcoming", get(get_upcoming_goals))
        .route("/goals/summary", get(get_goal_summary))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/contributions", post(add_to_goal))
}
