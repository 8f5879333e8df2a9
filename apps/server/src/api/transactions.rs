use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use dhanrakshak_core::transactions::{NewTransaction, Transaction, TransactionSummary};

async fn get_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.transaction_service.get_transactions()))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let t = state
        .transaction_service
        .create_transaction(transaction)
        .await?;
    Ok(Json(t))
}

async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<Transaction>,
) -> ApiResult<Json<Transaction>> {
    let t = state
        .transaction_service
        .update_transaction(transaction)
        .await?;
    Ok(Json(t))
}

async fn delete_transaction(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn transaction_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TransactionSummary>> {
    Ok(Json(state.transaction_service.get_summary()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions)
                .post(create_transaction)
                .put(update_transaction),
        )
        .route("/transactions/summary", get(transaction_summary))
        .route("/transactions/{id}", delete(delete_transaction))
}
