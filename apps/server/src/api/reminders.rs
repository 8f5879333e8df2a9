use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use dhanrakshak_core::reminders::{NewReminder, Reminder};
use serde::Serialize;

async fn get_reminders(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(state.reminder_service.get_reminders()))
}

async fn get_active_reminders(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(state.reminder_service.get_active_reminders()))
}

async fn get_upcoming_reminders(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(state.reminder_service.get_upcoming_reminders()))
}

async fn get_overdue_reminders(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(state.reminder_service.get_overdue_reminders()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BillsResponse {
    bills: Vec<Reminder>,
    monthly_total: f64,
}

async fn get_bills(State(state): State<Arc<AppState>>) -> ApiResult<Json<BillsResponse>> {
    Ok(Json(BillsResponse {
        bills: state.reminder_service.get_bill_reminders(),
        monthly_total: state.reminder_service.get_monthly_bills_total(),
    }))
}

async fn create_reminder(
    State(state): State<Arc<AppState>>,
    Json(reminder): Json<NewReminder>,
) -> ApiResult<Json<Reminder>> {
    let r = state.reminder_service.create_reminder(reminder).await?;
    Ok(Json(r))
}

async fn update_reminder(
    State(state): State<Arc<AppState>>,
    Json(reminder): Json<Reminder>,
) -> ApiResult<Json<Reminder>> {
    let r = state.reminder_service.update_reminder(reminder).await?;
    Ok(Json(r))
}

async fn toggle_reminder(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Reminder>> {
    let r = state.reminder_service.toggle_reminder(id).await?;
    Ok(Json(r))
}

async fn delete_reminder(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.reminder_service.delete_reminder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reminders",
            get(get_reminders)
                .post(create_reminder)
                .put(update_reminder),
        )
        .route("/reminders/active", get(get_active_reminders))
        .route("/reminders/upcoming", get(get_upcoming_reminders))
        .route("/reminders/overdue", get(get_overdue_reminders))
        .route("/reminders/bills", get(get_bills))
        .route("/reminders/{id}", delete(delete_reminder))
        .route("/reminders/{id}/toggle", post(toggle_reminder))
}
