use sqlx::{postgres::PgRow, Executor, Postgres, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use crate::domains::token::models::{Token, TokenMetadata};

const TOKEN_COLUMNS: &str = "id, wallet_id, symbol, name, balance, price, is_forced, contract_address, created_at, updated_at";

// 토큰 잔고 레포지토리
// TokenRepository: database operations for per-wallet balance rows
//
// 주의: 잔고 음수 검사는 여기서 하지 않음 (TokenLedger가 잠금 후 검사)
pub struct TokenRepository;

impl TokenRepository {
    /// ID로 토큰 조회
    /// Get token by ID
    pub async fn find_by_id<'e, E>(executor: E, token_id: u64) -> Result<Option<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(&format!("SELECT {} FROM tokens WHERE id = $1", TOKEN_COLUMNS))
            .bind(token_id as i64)
            .fetch_optional(executor)
            .await
            .context("Failed to fetch token by id")?;

        row.as_ref().map(map_token).transpose()
    }

    /// 지갑 ID와 심볼로 토큰 조회
    /// Get token by wallet ID and symbol
    pub async fn find_by_wallet_and_symbol<'e, E>(
        executor: E,
        wallet_id: u64,
        symbol: &str,
    ) -> Result<Option<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tokens WHERE wallet_id = $1 AND symbol = $2",
            TOKEN_COLUMNS
        ))
        .bind(wallet_id as i64)
        .bind(symbol)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch token by wallet and symbol")?;

        row.as_ref().map(map_token).transpose()
    }

    /// 행 잠금 후 조회 (SELECT ... FOR UPDATE)
    /// Lock a token row for the rest of the enclosing transaction
    pub async fn lock_by_id<'e, E>(executor: E, token_id: u64) -> Result<Option<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tokens WHERE id = $1 FOR UPDATE",
            TOKEN_COLUMNS
        ))
        .bind(token_id as i64)
        .fetch_optional(executor)
        .await
        .context("Failed to lock token row")?;

        row.as_ref().map(map_token).transpose()
    }

    /// 지갑의 모든 토큰 조회
    /// Get all tokens of a wallet
    pub async fn list_by_wallet<'e, E>(executor: E, wallet_id: u64) -> Result<Vec<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tokens WHERE wallet_id = $1 ORDER BY id ASC",
            TOKEN_COLUMNS
        ))
        .bind(wallet_id as i64)
        .fetch_all(executor)
        .await
        .context("Failed to fetch tokens by wallet")?;

        rows.iter().map(map_token).collect()
    }

    /// 가격 고정 토큰 전체 조회 (관리자 개요)
    /// Get every forced-price token row
    pub async fn list_forced<'e, E>(executor: E) -> Result<Vec<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tokens WHERE is_forced = TRUE ORDER BY wallet_id ASC, id ASC",
            TOKEN_COLUMNS
        ))
        .fetch_all(executor)
        .await
        .context("Failed to fetch forced tokens")?;

        rows.iter().map(map_token).collect()
    }

    /// 0 잔고 행 생성 (이미 있으면 None)
    /// Insert a zero-balance row; returns None when (wallet_id, symbol) already exists
    pub async fn insert_if_absent<'e, E>(
        executor: E,
        wallet_id: u64,
        symbol: &str,
        metadata: &TokenMetadata,
    ) -> Result<Option<Token>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tokens (wallet_id, symbol, name, balance, price, is_forced, contract_address, created_at, updated_at)
            VALUES ($1, $2, $3, 0, $4, $5, $6, $7, $7)
            ON CONFLICT (wallet_id, symbol) DO NOTHING
            RETURNING {}
            "#,
            TOKEN_COLUMNS
        ))
        .bind(wallet_id as i64)
        .bind(symbol)
        .bind(&metadata.name)
        .bind(metadata.price)
        .bind(metadata.is_forced)
        .bind(&metadata.contract_address)
        .bind(now)
        .fetch_optional(executor)
        .await
        .context("Failed to insert token")?;

        row.as_ref().map(map_token).transpose()
    }

    /// 잔고 설정 (검사는 호출자 책임)
    /// Write an already-validated balance
    pub async fn set_balance<'e, E>(executor: E, token_id: u64, balance: Decimal) -> Result<Token>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(&format!(
            "UPDATE tokens SET balance = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            TOKEN_COLUMNS
        ))
        .bind(balance)
        .bind(Utc::now())
        .bind(token_id as i64)
        .fetch_one(executor)
        .await
        .context("Failed to update token balance")?;

        map_token(&row)
    }

    /// 가격 설정 (관리자 발행 시)
    /// Overwrite the displayed price
    pub async fn set_price<'e, E>(executor: E, token_id: u64, price: Decimal) -> Result<Token>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(&format!(
            "UPDATE tokens SET price = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            TOKEN_COLUMNS
        ))
        .bind(price)
        .bind(Utc::now())
        .bind(token_id as i64)
        .fetch_one(executor)
        .await
        .context("Failed to update token price")?;

        map_token(&row)
    }

    /// 시장 가격 캐시 갱신 (가격 고정 토큰은 건드리지 않음)
    /// Cache a market quote on a non-forced row; returns whether a row changed
    pub async fn set_market_price<'e, E>(executor: E, token_id: u64, price: Decimal) -> Result<bool>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE tokens
            SET price = $1, updated_at = $2
            WHERE id = $3 AND is_forced = FALSE
            "#,
        )
        .bind(price)
        .bind(Utc::now())
        .bind(token_id as i64)
        .execute(executor)
        .await
        .context("Failed to cache market price")?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_token(row: &PgRow) -> Result<Token> {
    Ok(Token {
        id: row.try_get::<i64, _>("id")? as u64,
        wallet_id: row.try_get::<i64, _>("wallet_id")? as u64,
        symbol: row.try_get("symbol")?,
        name: row.try_get("name")?,
        balance: row.try_get("balance")?,
        price: row.try_get("price")?,
        is_forced: row.try_get("is_forced")?,
        contract_address: row.try_get("contract_address")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
