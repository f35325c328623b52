use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use anyhow::bail;
use std::str::FromStr;

// DB 저장용 Transaction 모델 (append-only)
// 송금 1건마다 송신자/수신자 각각 1행씩 생성됨
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Transaction)]
pub struct Transaction {
    /// Transaction ID (BIGSERIAL)
    pub id: u64,

    /// 이 기록이 속한 지갑
    /// Wallet this record is attached to
    pub wallet_id: u64,

    pub token_id: u64,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// 수량 (항상 양수)
    /// Amount (always positive)
    #[schema(value_type = String, example = "200.0")]
    pub amount: Decimal,

    pub status: TransactionStatus,

    /// 상대방 지갑 주소 (send: 수신자, receive: 송신자)
    /// Other side of the transfer
    pub counterparty_address: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// 거래 방향
/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Send,
    Receive,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Send => "send",
            TransactionType::Receive => "receive",
        }
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send" => Ok(TransactionType::Send),
            "receive" => Ok(TransactionType::Receive),
            other => bail!("Unknown transaction type: {}", other),
        }
    }
}

// Transaction 상태 enum
// 현재는 동기 처리만 하므로 항상 Completed로 기록됨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(TransactionStatus::Completed),
            "pending" => Ok(TransactionStatus::Pending),
            "failed" => Ok(TransactionStatus::Failed),
            other => bail!("Unknown transaction status: {}", other),
        }
    }
}
