use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use anyhow::bail;
use std::str::FromStr;
use crate::domains::token::models::Token;

// =====================================================
// TokenInjection 모델 (관리자 감사 기록)
// =====================================================
// kind:
// - mint: 발행 (잔고 증가), 발행 시점 가격 기록
// - burn: 소각 (잔고 감소), 가격은 0으로 기록
//
// amount는 항상 양수로 저장하고 방향은 kind로 구분
// =====================================================

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = TokenInjection)]
pub struct TokenInjection {
    pub id: u64,
    pub token_id: u64,
    #[schema(example = "USDT")]
    pub symbol: String,
    pub kind: InjectionKind,
    /// 수량 (양수)
    #[schema(value_type = String, example = "100.0")]
    pub amount: Decimal,
    #[schema(value_type = String, example = "1.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InjectionKind {
    Mint,
    Burn,
}

impl InjectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionKind::Mint => "mint",
            InjectionKind::Burn => "burn",
        }
    }
}

impl FromStr for InjectionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mint" => Ok(InjectionKind::Mint),
            "burn" => Ok(InjectionKind::Burn),
            other => bail!("Unknown injection kind: {}", other),
        }
    }
}

/// 발행 요청
/// Inject (mint) request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = InjectRequest)]
pub struct InjectRequest {
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub wallet_address: String,
    #[schema(example = "USDT")]
    pub symbol: String,
    #[schema(value_type = String, example = "100")]
    pub amount: Decimal,
    #[schema(value_type = String, example = "1.00")]
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(as = InjectResponse)]
pub struct InjectResponse {
    pub token: Token,
    pub injection: TokenInjection,
}

/// 소각 요청
/// Burn request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = BurnRequest)]
pub struct BurnRequest {
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub wallet_address: String,
    #[schema(example = "USDT")]
    pub symbol: String,
    #[schema(value_type = String, example = "50")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(as = BurnResponse)]
pub struct BurnResponse {
    pub token: Token,
    pub burn_record: TokenInjection,
}

/// 관리자 개요: 가격 고정 토큰 + 발행/소각 이력
/// Admin overview: forced tokens and injection history
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = InjectionsResponse)]
pub struct InjectionsResponse {
    pub forced_tokens: Vec<Token>,
    pub injections: Vec<TokenInjection>,
}
