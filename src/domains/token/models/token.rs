use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use crate::domains::token::models::Transaction;

// =====================================================
// Token 모델
// =====================================================
// 역할: 지갑별 토큰 잔고 행 (전역 자산 정의가 아님)
//
// 불변식:
// - (wallet_id, symbol) 쌍마다 최대 1개의 행
// - balance >= 0 (모든 변경 연산 경계에서 검사)
//
// is_forced:
// - true: 가격이 관리자에 의해 고정됨 (예: USDT = 1.00)
// - false: 시장 가격 피드에서 조회 시 갱신
// =====================================================

/// 지갑별 토큰 잔고
/// Per-wallet token balance row
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Token)]
pub struct Token {
    /// Token row ID (BIGSERIAL)
    pub id: u64,

    /// 소유 지갑 ID
    /// Owning wallet ID
    pub wallet_id: u64,

    #[schema(example = "USDT")]
    pub symbol: String,

    #[schema(example = "Tether USD")]
    pub name: String,

    /// 잔고 (항상 0 이상)
    /// Balance (never negative)
    #[schema(value_type = String, example = "100.0")]
    pub balance: Decimal,

    /// USD 단가
    /// Current USD unit price
    #[schema(value_type = String, example = "1.00")]
    pub price: Decimal,

    /// 가격 고정 여부
    /// Price is administratively fixed
    pub is_forced: bool,

    /// 컨트랙트 주소 (컨트랙트 조회로 추가된 토큰만)
    /// Contract address (tokens added via contract lookup)
    pub contract_address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 토큰 표시 메타데이터 (새 행 생성 시 템플릿)
/// Display metadata copied onto a newly created balance row
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub price: Decimal,
    pub is_forced: bool,
    pub contract_address: Option<String>,
}

impl From<&Token> for TokenMetadata {
    fn from(token: &Token) -> Self {
        Self {
            name: token.name.clone(),
            price: token.price,
            is_forced: token.is_forced,
            contract_address: token.contract_address.clone(),
        }
    }
}

/// 지갑 토큰 목록 응답
/// Wallet token list response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WalletTokensResponse)]
pub struct WalletTokensResponse {
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub address: String,
    pub tokens: Vec<Token>,
}

/// 토큰 상세 응답 (최근 거래 20건 포함)
/// Token detail response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TokenDetailResponse)]
pub struct TokenDetailResponse {
    pub token: Token,
    pub wallet_address: String,
    pub transactions: Vec<Transaction>,
}

/// 거래 목록 조회 쿼리
/// Transaction list query
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TransactionsQuery {
    /// 최대 개수 (기본 20, 최대 100)
    /// Max rows (default 20, capped at 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TransactionsResponse)]
pub struct TransactionsResponse {
    pub token_id: u64,
    pub transactions: Vec<Transaction>,
}

/// 컨트랙트 토큰 정보 응답
/// Contract token metadata response
#[derive(Debug, Serialize, ToSchema, Clone)]
#[schema(as = ContractTokenResponse)]
pub struct ContractTokenResponse {
    #[schema(example = "0xdac17f958d2ee523a2206206994597c13d831ec7")]
    pub contract_address: String,
    #[schema(example = "USDT")]
    pub symbol: String,
    #[schema(example = "Tether USD")]
    pub name: String,
    #[schema(example = 6)]
    pub decimals: u8,
    #[schema(value_type = String, example = "1.00")]
    pub price: Decimal,
}

/// 컨트랙트 주소로 토큰 추가 요청
/// Add token by contract request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = AddTokenRequest)]
pub struct AddTokenRequest {
    #[schema(example = "0xdac17f958d2ee523a2206206994597c13d831ec7")]
    pub contract_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(as = AddTokenResponse)]
pub struct AddTokenResponse {
    pub token: Token,
    pub message: String,
}
