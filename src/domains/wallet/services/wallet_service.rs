use std::sync::Arc;
use crate::domains::wallet::models::{CreateWalletRequest, CreateWalletResponse, Wallet};
use crate::domains::wallet::services::{ResolvedWallet, WalletStore};
use crate::shared::database::{Database, TokenRepository};
use crate::shared::errors::LedgerError;
use crate::shared::utils::address_generator::{
    derive_address, derive_public_key, generate_private_key, KeyMaterial, MAX_GENERATION_ATTEMPTS,
};
use crate::shared::utils::validation::normalize_address;

/// 새 키 재료 생성 함수
/// Source of fresh key material for server-generated wallets
pub type KeyGenerator = Arc<dyn Fn() -> KeyMaterial + Send + Sync>;

/// 지갑 서비스
/// WalletService: wallet creation, import and lookup
#[derive(Clone)]
pub struct WalletService {
    db: Database,
    generate_keys: KeyGenerator,
}

impl WalletService {
    pub fn new(db: Database) -> Self {
        Self::with_key_generator(db, Arc::new(KeyMaterial::generate))
    }

    /// 키 생성기를 지정해 생성 (주소 충돌 재시도 테스트용)
    pub fn with_key_generator(db: Database, generate_keys: KeyGenerator) -> Self {
        Self { db, generate_keys }
    }

    /// 지갑 생성 또는 가져오기
    /// Create or import a wallet
    ///
    /// 처리 순서:
    /// 1. 요청에서 키 재료 결정 (없는 값은 생성/유도)
    /// 2. 주소로 조회, 없으면 생성 + 기본 토큰 지급 (한 트랜잭션)
    /// 3. 완전히 새로 생성한 키가 기존 주소와 겹치면 재생성 (최대 5회)
    pub async fn create_or_import(
        &self,
        request: CreateWalletRequest,
    ) -> Result<CreateWalletResponse, LedgerError> {
        let request = KeyRequest::from(request);

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let keys = request.key_material(self.generate_keys.as_ref())?;

            let mut uow = self.db.begin().await?;
            let result = if request.is_generated() {
                // 생성된 키는 기존 지갑으로 해석하지 않음
                WalletStore::create(uow.conn(), &keys)
                    .await
                    .map(|created| created.map(|wallet| ResolvedWallet { wallet, created: true }))
            } else {
                WalletStore::resolve_or_create(uow.conn(), &keys).await.map(Some)
            };

            match uow.finish(result).await? {
                Some(resolved) => return self.respond(&request, keys, resolved).await,
                None => {
                    tracing::warn!(attempt, "generated wallet address collided, regenerating");
                }
            }
        }

        tracing::error!(attempts = MAX_GENERATION_ATTEMPTS, "could not generate a unique wallet address");
        Err(LedgerError::WalletGenerationFailed {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    async fn respond(
        &self,
        request: &KeyRequest,
        keys: KeyMaterial,
        resolved: ResolvedWallet,
    ) -> Result<CreateWalletResponse, LedgerError> {
        let tokens = TokenRepository::list_by_wallet(self.db.pool(), resolved.wallet.id).await?;

        // 서버가 만든 비밀 키는 새 지갑일 때만 한 번 반환
        let private_key = (resolved.created && request.private_key.is_none()).then_some(keys.private_key);

        Ok(CreateWalletResponse {
            address: resolved.wallet.address,
            public_key: resolved.wallet.public_key,
            private_key,
            created: resolved.created,
            tokens,
        })
    }

    /// 지갑 조회
    /// Get wallet by address
    pub async fn get_wallet(&self, address: &str) -> Result<Wallet, LedgerError> {
        let address = normalize_address(address)?;
        WalletStore::find(self.db.pool(), &address)
            .await?
            .ok_or(LedgerError::WalletNotFound { address })
    }
}

/// 정리된 지갑 생성 요청 (빈 문자열은 없는 값으로 취급)
#[derive(Debug, Clone)]
struct KeyRequest {
    address: Option<String>,
    public_key: Option<String>,
    private_key: Option<String>,
}

impl From<CreateWalletRequest> for KeyRequest {
    fn from(request: CreateWalletRequest) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        Self {
            address: present(request.address),
            public_key: present(request.public_key),
            private_key: present(request.private_key),
        }
    }
}

impl KeyRequest {
    /// 아무 값도 없으면 서버가 키를 전부 생성
    fn is_generated(&self) -> bool {
        self.address.is_none() && self.public_key.is_none() && self.private_key.is_none()
    }

    fn key_material(
        &self,
        generate: &(dyn Fn() -> KeyMaterial + Send + Sync),
    ) -> Result<KeyMaterial, LedgerError> {
        match (&self.address, &self.private_key, &self.public_key) {
            (Some(address), private_key, public_key) => {
                let address = normalize_address(address)?;
                let private_key = private_key.clone().unwrap_or_else(generate_private_key);
                let public_key = public_key
                    .clone()
                    .unwrap_or_else(|| derive_public_key(&private_key));
                Ok(KeyMaterial { private_key, public_key, address })
            }
            (None, Some(private_key), Some(public_key)) => Ok(KeyMaterial::from_parts(private_key, public_key)),
            (None, Some(private_key), None) => Ok(KeyMaterial::from_private_key(private_key)),
            (None, None, Some(public_key)) => Ok(KeyMaterial {
                private_key: generate_private_key(),
                public_key: public_key.clone(),
                address: derive_address(public_key),
            }),
            (None, None, None) => Ok(generate()),
        }
    }
}
