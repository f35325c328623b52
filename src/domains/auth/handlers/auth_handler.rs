use crate::domains::auth::models::{SessionResponse, SigninRequest, SigninResponse};
use crate::shared::services::AppState;
use crate::shared::errors::AuthError;
use crate::shared::middleware::{ApiJson, AuthenticatedWallet};
use axum::{extract::State, http::StatusCode, Json};

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Session issued", body = SigninResponse),
        (status = 400, description = "Invalid wallet address"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn signin(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<SigninRequest>,
) -> Result<Json<SigninResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .auth_state
        .auth_service
        .signin(&request.address)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Session wallet", body = SessionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    session: AuthenticatedWallet,
) -> Result<Json<SessionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .auth_state
        .auth_service
        .find_wallet(&session.address)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(SessionResponse { wallet }))
}
