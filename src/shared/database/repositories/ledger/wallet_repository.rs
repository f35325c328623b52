use sqlx::{postgres::PgRow, Executor, Postgres, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::wallet::models::Wallet;

// 지갑 레포지토리
// WalletRepository: database operations for wallets
// 모든 메서드는 풀(&PgPool) 또는 작업 단위 연결(&mut PgConnection) 어느 쪽에서도 실행 가능
pub struct WalletRepository;

impl WalletRepository {
    /// 주소로 지갑 조회
    /// Get wallet by address
    pub async fn find_by_address<'e, E>(executor: E, address: &str) -> Result<Option<Wallet>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(
            r#"
            SELECT id, address, public_key, encrypted_private_key, created_at
            FROM wallets
            WHERE address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch wallet by address")?;

        row.as_ref().map(map_wallet).transpose()
    }

    /// ID로 지갑 조회
    /// Get wallet by ID
    pub async fn find_by_id<'e, E>(executor: E, wallet_id: u64) -> Result<Option<Wallet>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(
            r#"
            SELECT id, address, public_key, encrypted_private_key, created_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(wallet_id as i64)
        .fetch_optional(executor)
        .await
        .context("Failed to fetch wallet by id")?;

        row.as_ref().map(map_wallet).transpose()
    }

    /// 지갑 생성 (이미 있으면 아무것도 하지 않고 None)
    /// Insert a wallet; returns None when the address already exists
    pub async fn insert_if_absent<'e, E>(
        executor: E,
        address: &str,
        public_key: &str,
        encrypted_private_key: &str,
    ) -> Result<Option<Wallet>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query(
            r#"
            INSERT INTO wallets (address, public_key, encrypted_private_key, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (address) DO NOTHING
            RETURNING id, address, public_key, encrypted_private_key, created_at
            "#,
        )
        .bind(address)
        .bind(public_key)
        .bind(encrypted_private_key)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await
        .context("Failed to insert wallet")?;

        row.as_ref().map(map_wallet).transpose()
    }
}

fn map_wallet(row: &PgRow) -> Result<Wallet> {
    Ok(Wallet {
        id: row.try_get::<i64, _>("id")? as u64,
        address: row.try_get("address")?,
        public_key: row.try_get("public_key")?,
        encrypted_private_key: row.try_get("encrypted_private_key")?,
        created_at: row.try_get("created_at")?,
    })
}
