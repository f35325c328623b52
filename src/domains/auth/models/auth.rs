use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::wallet::models::Wallet;

// 로그인 요청 모델 (지갑 주소로 세션 발급)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = SigninRequest)]
pub struct SigninRequest {
    /// Wallet address
    /// 지갑 주소
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub address: String,
}

// 로그인 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SigninResponse)]
pub struct SigninResponse {
    pub wallet: Wallet,

    /// JWT Access Token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// 만료 시각 (unix seconds)
    pub expires_at: i64,
}

// 현재 세션 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SessionResponse)]
pub struct SessionResponse {
    pub wallet: Wallet,
}
