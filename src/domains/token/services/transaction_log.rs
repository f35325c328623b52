use sqlx::{Executor, PgConnection, PgPool, Postgres};
use rust_decimal::Decimal;
use crate::domains::token::models::{Transaction, TransactionStatus, TransactionType};
use crate::shared::database::{TokenRepository, TransactionCreate, TransactionRepository};
use crate::shared::errors::LedgerError;

/// 기본/최대 조회 개수
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// 거래 로그 (append-only)
/// Transaction Log
///
/// 잔고 변경 1건마다 기록 1건. 수정/삭제 연산은 없음
pub struct TransactionLog;

impl TransactionLog {
    /// 거래 기록 추가 (호출자의 트랜잭션 안에서)
    /// Append a record inside the caller's unit of work
    pub async fn record(
        conn: &mut PgConnection,
        wallet_id: u64,
        token_id: u64,
        tx_type: TransactionType,
        amount: Decimal,
        status: TransactionStatus,
        counterparty_address: Option<&str>,
    ) -> Result<Transaction, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                reason: format!("transaction amount must be positive, got {}", amount),
            });
        }

        let create = TransactionCreate {
            wallet_id,
            token_id,
            tx_type,
            amount,
            status,
            counterparty_address,
        };

        Ok(TransactionRepository::insert(conn, &create).await?)
    }

    /// 토큰별 거래 조회 (최신순)
    /// List a token's history, newest first
    pub async fn list_for_token<'e, E>(
        executor: E,
        token_id: u64,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, LedgerError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let limit = clamp_limit(limit);
        Ok(TransactionRepository::list_by_token(executor, token_id, limit).await?)
    }

    /// 토큰 존재 확인 후 조회
    /// Same as `list_for_token` but fails with TokenIdNotFound for unknown tokens
    pub async fn list_for_existing_token(
        pool: &PgPool,
        token_id: u64,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        TokenRepository::find_by_id(pool, token_id)
            .await?
            .ok_or(LedgerError::TokenIdNotFound { id: token_id })?;

        Self::list_for_token(pool, token_id, limit).await
    }
}

/// 1..=100 범위로 제한 (기본 20)
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}
