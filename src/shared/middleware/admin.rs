use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use crate::shared::services::AppState;
use crate::shared::errors::LedgerError;

/// 관리자 인증 헤더
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// 관리자 인증 (x-admin-key 헤더 == ADMIN_KEY)
/// Admin credential guard
///
/// 본문 extractor보다 앞에 두면 잘못된 키는 본문 검증 전에 401로 거절됨
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

#[async_trait]
impl FromRequestParts<AppState> for AdminKey {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if provided.is_empty() || !constant_time_eq(provided.as_bytes(), state.admin_state.admin_key.as_bytes()) {
            tracing::warn!("rejected admin request with invalid credential");
            return Err(LedgerError::Unauthorized.into());
        }

        Ok(AdminKey)
    }
}

/// 길이가 같으면 내용과 무관하게 같은 시간에 비교
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
