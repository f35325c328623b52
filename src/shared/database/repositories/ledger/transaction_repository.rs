use sqlx::{postgres::PgRow, Executor, Postgres, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use crate::domains::token::models::{Transaction, TransactionStatus, TransactionType};

/// 새 거래 기록 (INSERT용)
/// New transaction record
#[derive(Debug, Clone)]
pub struct TransactionCreate<'a> {
    pub wallet_id: u64,
    pub token_id: u64,
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub counterparty_address: Option<&'a str>,
}

// 거래 기록 레포지토리 (append-only: INSERT/SELECT만 존재)
// TransactionRepository: append-only transaction log
pub struct TransactionRepository;

impl TransactionRepository {
    /// 거래 기록 추가
    /// Append a transaction record
    pub async fn insert<'e, E>(executor: E, create: &TransactionCreate<'_>) -> Result<Transaction>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (wallet_id, token_id, tx_type, amount, status, counterparty_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, wallet_id, token_id, tx_type, amount, status, counterparty_address, created_at
            "#,
        )
        .bind(create.wallet_id as i64)
        .bind(create.token_id as i64)
        .bind(create.tx_type.as_str())
        .bind(create.amount)
        .bind(create.status.as_str())
        .bind(create.counterparty_address)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .context("Failed to insert transaction")?;

        map_transaction(&row)
    }

    /// 토큰별 거래 조회 (최신순)
    /// Get transactions of a token, newest first
    pub async fn list_by_token<'e, E>(executor: E, token_id: u64, limit: u32) -> Result<Vec<Transaction>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, token_id, tx_type, amount, status, counterparty_address, created_at
            FROM transactions
            WHERE token_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(token_id as i64)
        .bind(limit as i64)
        .fetch_all(executor)
        .await
        .context("Failed to fetch transactions by token")?;

        rows.iter().map(map_transaction).collect()
    }
}

fn map_transaction(row: &PgRow) -> Result<Transaction> {
    let tx_type: String = row.try_get("tx_type")?;
    let status: String = row.try_get("status")?;

    Ok(Transaction {
        id: row.try_get::<i64, _>("id")? as u64,
        wallet_id: row.try_get::<i64, _>("wallet_id")? as u64,
        token_id: row.try_get::<i64, _>("token_id")? as u64,
        tx_type: tx_type.parse()?,
        amount: row.try_get("amount")?,
        status: status.parse()?,
        counterparty_address: row.try_get("counterparty_address")?,
        created_at: row.try_get("created_at")?,
    })
}
