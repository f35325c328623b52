use crate::domains::transfer::models::{TransferRequest, TransferResponse};
use crate::shared::services::AppState;
use crate::shared::errors::LedgerError;
use crate::shared::middleware::{ApiJson, AuthenticatedWallet};
use axum::{extract::State, http::StatusCode, Json};

/// 송금 핸들러
/// Transfer handler
/// Note: sender_address는 세션 지갑과 같아야 함 (아니면 403)
#[utoipa::path(
    post,
    path = "/api/transfers",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer completed", body = TransferResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Sender is not the session wallet"),
        (status = 404, description = "Sender, receiver or token not found"),
        (status = 409, description = "Insufficient balance"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Transfers"
)]
pub async fn transfer(
    State(app_state): State<AppState>,
    session: AuthenticatedWallet,
    ApiJson(request): ApiJson<TransferRequest>,
) -> Result<Json<TransferResponse>, (StatusCode, Json<serde_json::Value>)> {
    session
        .ensure_owns(&request.sender_address)
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let outcome = app_state
        .transfer_state
        .transfer_service
        .transfer(
            &request.sender_address,
            &request.receiver_address,
            &request.symbol,
            request.amount,
        )
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(outcome.into()))
}
