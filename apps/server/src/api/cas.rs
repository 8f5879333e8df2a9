use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::post, Json, Router};
use dhanrakshak_core::cas::{parse_cas_text, CasStatement};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct CasTextBody {
    text: String,
}

async fn parse_cas(Json(body): Json<CasTextBody>) -> ApiResult<Json<CasStatement>> {
    Ok(Json(parse_cas_text(&body.text)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CasImportResponse {
    imported: usize,
    statement: CasStatement,
}

/// Parses the statement text and adds every holding as a mutual-fund asset.
async fn import_cas(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CasTextBody>,
) -> ApiResult<Json<CasImportResponse>> {
    let statement = parse_cas_text(&body.text);
    let imported = state
        .asset_service
        .import_cas_holdings(&statement.holdings)
        .await?;
    tracing::info!("Imported {} holdings from CAS text", imported);
    Ok(Json(CasImportResponse {
        imported,
        statement,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cas/parse", post(parse_cas))
        .route("/cas/import", post(import_cas))
}
