use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use dhanrakshak_core::trips::{NewTrip, Trip, TripSummary};

async fn get_trips(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.trip_service.get_trips()))
}

async fn get_upcoming_trips(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.trip_service.get_upcoming_trips()))
}

async fn get_ongoing_trips(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.trip_service.get_ongoing_trips()))
}

async fn get_completed_trips(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.trip_service.get_completed_trips()))
}

async fn get_trip_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<TripSummary>> {
    Ok(Json(state.trip_service.get_summary()))
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(trip): Json<NewTrip>,
) -> ApiResult<Json<Trip>> {
    let t = state.trip_service.create_trip(trip).await?;
    Ok(Json(t))
}

async fn update_trip(
    State(state): State<Arc<AppState>>,
    Json(trip): Json<Trip>,
) -> ApiResult<Json<Trip>> {
    let t = state.trip_service.update_trip(trip).await?;
    Ok(Json(t))
}

async fn delete_trip(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.trip_service.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
struct ExpenseBody {
    amount: f64,
}

async fn add_expense(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExpenseBody>,
) -> ApiResult<Json<Trip>> {
    let t = state.trip_service.add_expense(id, body.amount).await?;
    Ok(Json(t))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", get(get_trips).post(create_trip).put(update_trip))
        .route("/trips/upcoming", get(get_upcoming_trips))
        .route("/trips/ongoing", get(get_ongoing_trips))
        .route("/trips/completed", get(get_completed_trips))
        .route("/trips/summary", get(get_trip_summary))
        .route("/trips/{id}", delete(delete_trip))
        .route("/trips/{id}/expenses", post(add_expense))
}
