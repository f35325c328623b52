use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use crate::domains::token::models::Token;

/// 지갑 (주소는 생성 후 변경 불가)
/// Custodial wallet record; the address never changes once created
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Wallet)]
pub struct Wallet {
    /// Wallet ID (BIGSERIAL)
    pub id: u64,

    /// 지갑 주소 (0x + 40 hex, 소문자)
    /// Wallet address (lowercase 0x-prefixed hex)
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub address: String,

    /// 공개 키
    /// Public key
    pub public_key: String,

    /// 저장된 비밀 키 (응답에 포함하지 않음)
    /// Stored secret, never serialized
    #[serde(skip_serializing, default)]
    pub encrypted_private_key: String,

    pub created_at: DateTime<Utc>,
}

/// 지갑 생성/가져오기 요청
/// Create or import wallet request
///
/// - 모두 비어 있으면: 새 키 생성
/// - private_key만: 해당 키로 가져오기 (같은 키는 같은 지갑)
/// - address: 해당 주소로 조회 또는 생성
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = CreateWalletRequest)]
pub struct CreateWalletRequest {
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub address: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

/// 지갑 생성 응답
/// Create wallet response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CreateWalletResponse)]
pub struct CreateWalletResponse {
    pub address: String,
    pub public_key: String,

    /// 서버가 새로 생성한 비밀 키 (이번 한 번만 반환)
    /// Server-generated private key, returned only on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// 새로 생성되었는지 여부
    /// Whether the wallet row was created by this call
    pub created: bool,

    pub tokens: Vec<Token>,
}

/// 지갑 조회 응답
/// Get wallet response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WalletResponse)]
pub struct WalletResponse {
    pub wallet: Wallet,
}
