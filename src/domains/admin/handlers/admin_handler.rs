use crate::domains::admin::models::{
    BurnRequest, BurnResponse, InjectRequest, InjectResponse, InjectionsResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::LedgerError;
use crate::shared::middleware::{AdminKey, ApiJson};
use axum::{extract::State, http::StatusCode, Json};

/// 토큰 발행 핸들러
/// Inject (mint) handler
/// Note: AdminKey가 본문 파싱보다 먼저 실행됨
#[utoipa::path(
    post,
    path = "/api/admin/inject",
    request_body = InjectRequest,
    responses(
        (status = 200, description = "Tokens injected", body = InjectResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Invalid admin key"),
        (status = 500, description = "Internal server error")
    ),
    security(("AdminKey" = [])),
    tag = "Admin"
)]
pub async fn inject(
    State(app_state): State<AppState>,
    _admin: AdminKey,
    ApiJson(request): ApiJson<InjectRequest>,
) -> Result<Json<InjectResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .admin_state
        .admin_service
        .inject(&request.wallet_address, &request.symbol, request.amount, request.price)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 토큰 소각 핸들러
/// Burn handler
#[utoipa::path(
    post,
    path = "/api/admin/burn",
    request_body = BurnRequest,
    responses(
        (status = 200, description = "Tokens burned", body = BurnResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Invalid admin key"),
        (status = 404, description = "Wallet or token not found"),
        (status = 409, description = "Insufficient balance"),
        (status = 500, description = "Internal server error")
    ),
    security(("AdminKey" = [])),
    tag = "Admin"
)]
pub async fn burn(
    State(app_state): State<AppState>,
    _admin: AdminKey,
    ApiJson(request): ApiJson<BurnRequest>,
) -> Result<Json<BurnResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .admin_state
        .admin_service
        .burn(&request.wallet_address, &request.symbol, request.amount)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 관리자 개요 핸들러
/// Forced tokens and injection history
#[utoipa::path(
    get,
    path = "/api/admin/injections",
    responses(
        (status = 200, description = "Admin overview", body = InjectionsResponse),
        (status = 401, description = "Invalid admin key"),
        (status = 500, description = "Internal server error")
    ),
    security(("AdminKey" = [])),
    tag = "Admin"
)]
pub async fn list_injections(
    State(app_state): State<AppState>,
    _admin: AdminKey,
) -> Result<Json<InjectionsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .admin_state
        .admin_service
        .list_injections()
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
