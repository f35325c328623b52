use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 세션 인증 관련 에러
/// Session authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 주소에 해당하는 지갑이 없음
    /// No wallet for this address
    #[error("Wallet not found: {address}")]
    WalletNotFound { address: String },

    #[error("Invalid wallet address: {address:?}")]
    InvalidAddress { address: String },

    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let (status, message) = match &err {
            AuthError::InvalidAddress { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
            AuthError::WalletNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            AuthError::InvalidToken | AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            AuthError::DatabaseError(_) | AuthError::Internal(_) => {
                tracing::error!(error = %err, "auth operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message })))
    }
}
