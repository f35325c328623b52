// Wallet domain routes
// 지갑 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::token::handlers::token_handler;
use crate::domains::wallet::handlers::wallet_handler;
use crate::shared::services::AppState;

/// Create wallet router
/// 지갑 라우터 생성
pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/", post(wallet_handler::create_wallet))
        .route("/:address", get(wallet_handler::get_wallet))
        .route("/:address/tokens", get(token_handler::list_wallet_tokens))
}
