// Admin domain routes
// 관리자 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::admin::handlers::admin_handler;
use crate::shared::services::AppState;

/// 모든 경로에 x-admin-key 필요
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/inject", post(admin_handler::inject))
        .route("/burn", post(admin_handler::burn))
        .route("/injections", get(admin_handler::list_injections))
}
