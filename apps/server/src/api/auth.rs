use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use dhanrakshak_core::auth::{AuthProviderTrait, Identity};

async fn get_session(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<Identity>>> {
    Ok(Json(state.session.current_identity()))
}

/// Accepts an identity issued by the external sign-in flow.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<Identity>,
) -> ApiResult<Json<Identity>> {
    state.session.sign_in(identity.clone());
    Ok(Json(identity))
}

async fn sign_out(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.session.sign_out();
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/auth/session",
        get(get_session).post(sign_in).delete(sign_out),
    )
}
