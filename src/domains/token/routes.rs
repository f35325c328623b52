// Token domain routes
// 토큰 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::token::handlers::token_handler;
use crate::shared::services::AppState;

/// Create tokens router
/// 토큰 라우터 생성
pub fn create_tokens_router() -> Router<AppState> {
    Router::new()
        .route("/", post(token_handler::add_token))  // 인증 필요
        .route("/:id", get(token_handler::get_token))
        .route("/:id/transactions", get(token_handler::list_token_transactions))
        .route("/contract/:contract_address", get(token_handler::lookup_contract))
}
