use sqlx::{Executor, PgConnection, Postgres};
use crate::domains::token::models::{Token, DEFAULT_TOKENS};
use crate::domains::wallet::models::Wallet;
use crate::shared::database::{TokenRepository, WalletRepository};
use crate::shared::errors::LedgerError;
use crate::shared::utils::address_generator::KeyMaterial;

/// 조회 또는 생성 결과
#[derive(Debug, Clone)]
pub struct ResolvedWallet {
    pub wallet: Wallet,
    /// 이번 호출에서 지갑 행이 생성되었는지
    pub created: bool,
}

/// 지갑 저장소 (주소 → 지갑)
/// Wallet Store
///
/// 규칙:
/// - 주소당 지갑 1개 (UNIQUE 제약으로 보장)
/// - 새 지갑은 같은 작업 단위 안에서 기본 토큰 행을 받음
/// - 지갑 삭제 연산 없음
pub struct WalletStore;

impl WalletStore {
    pub async fn find<'e, E>(executor: E, address: &str) -> Result<Option<Wallet>, LedgerError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        Ok(WalletRepository::find_by_address(executor, address).await?)
    }

    /// 새 지갑 생성 (주소가 이미 있으면 None, 아무것도 쓰지 않음)
    /// Create a wallet and provision default tokens; `None` if the address is taken
    pub async fn create(conn: &mut PgConnection, keys: &KeyMaterial) -> Result<Option<Wallet>, LedgerError> {
        let Some(wallet) = WalletRepository::insert_if_absent(
            &mut *conn,
            &keys.address,
            &keys.public_key,
            &keys.private_key,
        )
        .await?
        else {
            return Ok(None);
        };

        let provisioned = Self::provision_default_tokens(conn, wallet.id).await?;
        tracing::info!(
            address = %wallet.address,
            wallet_id = wallet.id,
            provisioned = provisioned.len(),
            "wallet created"
        );

        Ok(Some(wallet))
    }

    /// 주소로 조회, 없으면 생성 (동시 호출도 지갑은 하나만 생김)
    /// Resolve a wallet by address or create it with the given key material
    pub async fn resolve_or_create(
        conn: &mut PgConnection,
        keys: &KeyMaterial,
    ) -> Result<ResolvedWallet, LedgerError> {
        if let Some(wallet) = Self::find(&mut *conn, &keys.address).await? {
            return Ok(ResolvedWallet { wallet, created: false });
        }

        if let Some(wallet) = Self::create(&mut *conn, keys).await? {
            return Ok(ResolvedWallet { wallet, created: true });
        }

        // 동시 생성 경쟁에서 진 경우
        let wallet = Self::find(&mut *conn, &keys.address)
            .await?
            .ok_or_else(|| {
                LedgerError::Internal(format!("wallet {} vanished after conflict", keys.address))
            })?;

        Ok(ResolvedWallet { wallet, created: false })
    }

    /// 기본 카탈로그 토큰을 0 잔고로 생성 (이미 있는 심볼은 건너뜀)
    /// Provision the default catalog; idempotent per symbol
    ///
    /// # Returns
    /// 이번 호출에서 새로 만든 행
    pub async fn provision_default_tokens(
        conn: &mut PgConnection,
        wallet_id: u64,
    ) -> Result<Vec<Token>, LedgerError> {
        let mut created = Vec::new();

        for entry in DEFAULT_TOKENS.iter() {
            if let Some(token) =
                TokenRepository::insert_if_absent(&mut *conn, wallet_id, entry.symbol, &entry.metadata()).await?
            {
                created.push(token);
            }
        }

        Ok(created)
    }
}
