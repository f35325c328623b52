use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use rust_decimal::Decimal;
use crate::domains::token::models::{Token, Transaction};

/// 송금 요청
/// Transfer request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = TransferRequest)]
pub struct TransferRequest {
    /// 송신자 주소 (세션 지갑과 같아야 함)
    /// Sender address (must be the signed-in wallet)
    #[schema(example = "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")]
    pub sender_address: String,

    #[schema(example = "0x28c6c06298d514db089934071355e5743bf21d60")]
    pub receiver_address: String,

    #[schema(example = "USDT")]
    pub symbol: String,

    #[schema(value_type = String, example = "200")]
    pub amount: Decimal,
}

/// 송금 결과 (엔진 반환값)
/// Result of a completed transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub sender_tx: Transaction,
    pub receiver_tx: Transaction,
    pub sender_token: Token,
    pub receiver_token: Token,
}

/// 송금 응답
/// Transfer response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TransferResponse)]
pub struct TransferResponse {
    pub sender_tx: Transaction,
    pub receiver_tx: Transaction,

    /// 송금 후 송신자 잔고
    /// Sender balance after the transfer
    #[schema(value_type = String, example = "300")]
    pub sender_balance: Decimal,
}

impl From<TransferOutcome> for TransferResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            sender_balance: outcome.sender_token.balance,
            sender_tx: outcome.sender_tx,
            receiver_tx: outcome.receiver_tx,
        }
    }
}
