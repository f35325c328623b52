// Transfer domain routes
// 송금 도메인 라우터
use axum::{routing::post, Router};
use crate::domains::transfer::handlers::transfer_handler;
use crate::shared::services::AppState;

pub fn create_transfer_router() -> Router<AppState> {
    Router::new()
        .route("/", post(transfer_handler::transfer))  // 인증 필요
}
