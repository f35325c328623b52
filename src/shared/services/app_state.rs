use std::sync::Arc;
use crate::shared::clients::{CoinGeckoClient, EthRpcClient, PriceFeed, TokenMetadataLookup};
use crate::shared::config::AppConfig;
use crate::shared::database::Database;
use crate::domains::admin::services::AdminState;
use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::token::services::TokenState;
use crate::domains::transfer::services::TransferState;
use crate::domains::wallet::services::WalletState;
use anyhow::{Context, Result};

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 원장 데이터는 여기 두지 않음 (모든 잔고는 DB에서 읽음)
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub auth_state: AuthState,
    pub wallet_state: WalletState,
    pub token_state: TokenState,
    pub transfer_state: TransferState,
    pub admin_state: AdminState,
}

impl AppState {
    /// 설정에 있는 외부 API로 협력자를 만들어 AppState 생성
    /// Build the state with HTTP-backed collaborators
    pub fn new(db: Database, config: &AppConfig) -> Result<Self> {
        let price_feed = CoinGeckoClient::new(&config.price_feed_url)
            .context("Failed to create price feed client")?;
        let metadata_lookup = EthRpcClient::new(&config.ethereum_rpc_url)
            .context("Failed to create Ethereum RPC client")?;

        Ok(Self::with_collaborators(
            db,
            config,
            Arc::new(price_feed),
            Arc::new(metadata_lookup),
        ))
    }

    /// 협력자를 직접 주입 (테스트에서 사용)
    /// Build the state with injected collaborators
    pub fn with_collaborators(
        db: Database,
        config: &AppConfig,
        price_feed: Arc<dyn PriceFeed>,
        metadata_lookup: Arc<dyn TokenMetadataLookup>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            auth_state: AuthState::new(db.clone(), jwt_service),
            wallet_state: WalletState::new(db.clone()),
            token_state: TokenState::new(
                db.clone(),
                price_feed,
                metadata_lookup,
                config.price_refresh_timeout,
            ),
            transfer_state: TransferState::new(db.clone()),
            admin_state: AdminState::new(db.clone(), config.admin_key.clone()),
            db,
        }
    }
}
