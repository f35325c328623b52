use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use crate::shared::services::AppState;
use crate::shared::errors::{AuthError, LedgerError};

/// 인증된 지갑 정보 (JWT 토큰에서 추출)
/// Authenticated wallet (extracted from the session token)
///
/// 사용법:
/// ```ignore
/// pub async fn transfer(
///     State(app_state): State<AppState>,
///     session: AuthenticatedWallet,
///     ApiJson(request): ApiJson<TransferRequest>,
/// ) -> Result<...> {
///     session.ensure_owns(&request.sender_address)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedWallet {
    /// 세션 지갑 주소 (소문자 정규화됨)
    pub address: String,
}

impl AuthenticatedWallet {
    /// 요청 대상 지갑이 세션 지갑인지 확인 (아니면 403)
    /// Ensure the given address belongs to this session
    pub fn ensure_owns(&self, address: &str) -> Result<(), LedgerError> {
        if address.trim().eq_ignore_ascii_case(&self.address) {
            Ok(())
        } else {
            Err(LedgerError::Forbidden(format!(
                "session wallet {} cannot act for {}",
                self.address,
                address.trim()
            )))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedWallet {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        // 3. 토큰 검증
        let claims = state.auth_state.jwt_service.verify_access_token(token)?;

        Ok(AuthenticatedWallet {
            address: claims.sub.to_ascii_lowercase(),
        })
    }
}
