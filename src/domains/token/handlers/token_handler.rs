use crate::domains::token::models::{
    AddTokenRequest, AddTokenResponse, ContractTokenResponse, TokenDetailResponse,
    TransactionsQuery, TransactionsResponse, WalletTokensResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::LedgerError;
use crate::shared::middleware::{ApiJson, AuthenticatedWallet};
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};

/// 지갑 토큰 목록 핸들러 (시장 가격 갱신 포함)
/// List wallet tokens handler
#[utoipa::path(
    get,
    path = "/api/wallets/{address}/tokens",
    params(
        ("address" = String, Path, description = "Wallet address")
    ),
    responses(
        (status = 200, description = "Token rows of the wallet", body = WalletTokensResponse),
        (status = 400, description = "Invalid address"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tokens"
)]
pub async fn list_wallet_tokens(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WalletTokensResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .token_state
        .token_service
        .list_tokens(&address)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 토큰 상세 핸들러
/// Token detail handler
#[utoipa::path(
    get,
    path = "/api/tokens/{id}",
    params(
        ("id" = u64, Path, description = "Token row ID")
    ),
    responses(
        (status = 200, description = "Token detail", body = TokenDetailResponse),
        (status = 404, description = "Token not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tokens"
)]
pub async fn get_token(
    State(app_state): State<AppState>,
    Path(token_id): Path<u64>,
) -> Result<Json<TokenDetailResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .token_state
        .token_service
        .get_token(token_id)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 토큰 거래 목록 핸들러 (최신순)
/// Token transactions handler
#[utoipa::path(
    get,
    path = "/api/tokens/{id}/transactions",
    params(
        ("id" = u64, Path, description = "Token row ID"),
        ("limit" = Option<u32>, Query, description = "Max rows (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionsResponse),
        (status = 404, description = "Token not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tokens"
)]
pub async fn list_token_transactions(
    State(app_state): State<AppState>,
    Path(token_id): Path<u64>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .token_state
        .token_service
        .list_transactions(token_id, query.limit)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 컨트랙트 토큰 조회 핸들러
/// Contract token lookup handler
#[utoipa::path(
    get,
    path = "/api/tokens/contract/{contract_address}",
    params(
        ("contract_address" = String, Path, description = "ERC-20 contract address")
    ),
    responses(
        (status = 200, description = "Token metadata", body = ContractTokenResponse),
        (status = 400, description = "Invalid contract address"),
        (status = 502, description = "Lookup failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tokens"
)]
pub async fn lookup_contract(
    State(app_state): State<AppState>,
    Path(contract_address): Path<String>,
) -> Result<Json<ContractTokenResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .token_state
        .token_service
        .lookup_contract(&contract_address)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 컨트랙트 토큰 추가 핸들러 (세션 지갑에 추가)
/// Add token by contract handler
#[utoipa::path(
    post,
    path = "/api/tokens",
    request_body = AddTokenRequest,
    responses(
        (status = 200, description = "Token added (or already present)", body = AddTokenResponse),
        (status = 400, description = "Invalid contract address"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Lookup failed"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Tokens"
)]
pub async fn add_token(
    State(app_state): State<AppState>,
    session: AuthenticatedWallet,
    ApiJson(request): ApiJson<AddTokenRequest>,
) -> Result<Json<AddTokenResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .token_state
        .token_service
        .add_token_by_contract(&session.address, &request.contract_address)
        .await
        .map_err(|e: LedgerError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
