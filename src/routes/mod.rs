// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::Router;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::admin::routes::create_admin_router;
use crate::domains::auth::routes::create_auth_router;
use crate::domains::token::routes::create_tokens_router;
use crate::domains::transfer::routes::create_transfer_router;
use crate::domains::wallet::routes::create_wallet_router;

pub mod openapi;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/wallets", create_wallet_router())
        .nest("/api/transfers", create_transfer_router())
        .nest("/api/tokens", create_tokens_router())
        .nest("/api/admin", create_admin_router())
}
