use crate::domains::wallet::models::{CreateWalletRequest, CreateWalletResponse, WalletResponse};
use crate::shared::services::AppState;
use crate::shared::errors::LedgerError;
use crate::shared::middleware::ApiJson;
use axum::{extract::{Path, State}, http::StatusCode, Json};

/// 지갑 생성/가져오기 핸들러
/// Create or import wallet handler
/// Note: 새로 생성되면 201, 기존 지갑이면 200
#[utoipa::path(
    post,
    path = "/api/wallets",
    request_body = CreateWalletRequest,
    responses(
        (status = 201, description = "Wallet created", body = CreateWalletResponse),
        (status = 200, description = "Existing wallet resolved", body = CreateWalletResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallets"
)]
pub async fn create_wallet(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<CreateWalletRequest>,
) -> Result<(StatusCode, Json<CreateWalletResponse>), (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .wallet_state
        .wallet_service
        .create_or_import(request)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let status = if response.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(response)))
}

/// 지갑 조회 핸들러
/// Get wallet handler
#[utoipa::path(
    get,
    path = "/api/wallets/{address}",
    params(
        ("address" = String, Path, description = "Wallet address (0x + 40 hex)")
    ),
    responses(
        (status = 200, description = "Wallet found", body = WalletResponse),
        (status = 400, description = "Invalid address"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallets"
)]
pub async fn get_wallet(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WalletResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .get_wallet(&address)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletResponse { wallet }))
}
