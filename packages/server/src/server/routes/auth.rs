//! Login, registration, and logout.

use axum::{extract::Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domains::auth::{LoginResponse, RegisterResponse};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    match state.auth.login(&payload.email, &payload.password).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::debug!(email = %payload.email, "login rejected");
            Err(err.into())
        }
    }
}

/// Registration payload. Parsed for shape, then discarded: the account
/// directory is fixed to the demo fixture.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(_payload): Json<RegisterRequest>,
) -> Json<RegisterResponse> {
    Json(state.auth.register())
}

/// Tokens are stateless, so logout is a client-side discard; the endpoint
/// exists so clients have something to call.
pub async fn logout_handler() -> Json<Value> {
    Json(json!({ "success": true }))
}
