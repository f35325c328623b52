use crate::shared::database::{Database, WalletRepository};
use crate::domains::auth::models::SigninResponse;
use crate::domains::auth::services::JwtService;
use crate::domains::wallet::models::Wallet;
use crate::shared::errors::AuthError;
use crate::shared::utils::validation::normalize_address;

// 인증 서비스
// AuthService: maps a wallet address to a signed session
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(db: Database, jwt_service: JwtService) -> Self {
        Self { db, jwt_service }
    }

    // 로그인: 지갑이 있으면 세션 토큰 발급
    pub async fn signin(&self, address: &str) -> Result<SigninResponse, AuthError> {
        let wallet = self.find_wallet(address).await?;
        let (access_token, expires_at) = self.jwt_service.generate_access_token(&wallet.address)?;

        tracing::info!(address = %wallet.address, "session issued");

        Ok(SigninResponse {
            wallet,
            access_token,
            expires_at,
        })
    }

    /// 세션 지갑 조회
    pub async fn find_wallet(&self, address: &str) -> Result<Wallet, AuthError> {
        let address = normalize_address(address).map_err(|_| AuthError::InvalidAddress {
            address: address.to_string(),
        })?;

        WalletRepository::find_by_address(self.db.pool(), &address)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch wallet: {:#}", e)))?
            .ok_or(AuthError::WalletNotFound { address })
    }
}
