use sqlx::{postgres::PgRow, Executor, Postgres, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use crate::domains::admin::models::{InjectionKind, TokenInjection};

// 발행/소각 감사 기록 레포지토리 (append-only)
// InjectionRepository: admin mint/burn audit trail
pub struct InjectionRepository;

impl InjectionRepository {
    /// 감사 기록 추가
    /// Append an injection record (amount is always positive)
    pub async fn insert<'e, E>(
        executor: E,
        token_id: u64,
        symbol: &str,
        kind: InjectionKind,
        amount: Decimal,
        price: Decimal,
    ) -> Result<TokenInjection>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(
            r#"
            INSERT INTO token_injections (token_id, symbol, kind, amount, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, token_id, symbol, kind, amount, price, created_at
            "#,
        )
        .bind(token_id as i64)
        .bind(symbol)
        .bind(kind.as_str())
        .bind(amount)
        .bind(price)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .context("Failed to insert token injection")?;

        map_injection(&row)
    }

    /// 최근 감사 기록 조회 (최신순)
    /// Most recent injection records
    pub async fn list_recent<'e, E>(executor: E, limit: u32) -> Result<Vec<TokenInjection>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(
            r#"
            SELECT id, token_id, symbol, kind, amount, price, created_at
            FROM token_injections
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(executor)
        .await
        .context("Failed to fetch token injections")?;

        rows.iter().map(map_injection).collect()
    }

    /// 토큰별 감사 기록 조회
    /// Injection records of one token, newest first
    pub async fn list_by_token<'e, E>(executor: E, token_id: u64) -> Result<Vec<TokenInjection>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(
            r#"
            SELECT id, token_id, symbol, kind, amount, price, created_at
            FROM token_injections
            WHERE token_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(token_id as i64)
        .fetch_all(executor)
        .await
        .context("Failed to fetch token injections by token")?;

        rows.iter().map(map_injection).collect()
    }
}

fn map_injection(row: &PgRow) -> Result<TokenInjection> {
    let kind: String = row.try_get("kind")?;

    Ok(TokenInjection {
        id: row.try_get::<i64, _>("id")? as u64,
        token_id: row.try_get::<i64, _>("token_id")? as u64,
        symbol: row.try_get("symbol")?,
        kind: kind.parse()?,
        amount: row.try_get("amount")?,
        price: row.try_get("price")?,
        created_at: row.try_get("created_at")?,
    })
}
