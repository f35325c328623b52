use std::sync::Arc;
use crate::domains::token::models::{
    AddTokenResponse, ContractTokenResponse, Token, TokenDetailResponse, TokenMetadata,
    TransactionsResponse, WalletTokensResponse,
};
use crate::domains::token::services::{PriceService, TokenLedger, TransactionLog};
use crate::shared::clients::TokenMetadataLookup;
use crate::shared::database::{Database, TokenRepository, WalletRepository};
use crate::shared::errors::LedgerError;
use crate::shared::utils::validation::{normalize_address, normalize_contract_address, normalize_symbol};

/// 토큰 상세 화면에 포함되는 최근 거래 수
pub const TOKEN_DETAIL_HISTORY: u32 = 20;

/// 토큰 조회/추가 서비스
/// TokenService: token reads, contract lookup and import
#[derive(Clone)]
pub struct TokenService {
    db: Database,
    price_service: PriceService,
    metadata_lookup: Arc<dyn TokenMetadataLookup>,
}

impl TokenService {
    pub fn new(
        db: Database,
        price_service: PriceService,
        metadata_lookup: Arc<dyn TokenMetadataLookup>,
    ) -> Self {
        Self { db, price_service, metadata_lookup }
    }

    /// 지갑의 모든 토큰 행 조회 (시장 가격 갱신 포함)
    /// List a wallet's token rows with refreshed market prices
    pub async fn list_tokens(&self, wallet_address: &str) -> Result<WalletTokensResponse, LedgerError> {
        let address = normalize_address(wallet_address)?;
        let wallet = WalletRepository::find_by_address(self.db.pool(), &address)
            .await?
            .ok_or_else(|| LedgerError::WalletNotFound { address: address.clone() })?;

        let mut tokens = TokenRepository::list_by_wallet(self.db.pool(), wallet.id).await?;
        self.price_service.refresh_market_prices(&mut tokens).await;

        Ok(WalletTokensResponse {
            address: wallet.address,
            tokens,
        })
    }

    /// 토큰 상세 (행 + 소유 지갑 주소 + 최근 거래)
    /// Token detail with the owning wallet and recent history
    pub async fn get_token(&self, token_id: u64) -> Result<TokenDetailResponse, LedgerError> {
        let token = TokenRepository::find_by_id(self.db.pool(), token_id)
            .await?
            .ok_or(LedgerError::TokenIdNotFound { id: token_id })?;

        let wallet = WalletRepository::find_by_id(self.db.pool(), token.wallet_id)
            .await?
            .ok_or_else(|| {
                LedgerError::Internal(format!("token {} references missing wallet {}", token.id, token.wallet_id))
            })?;

        let transactions =
            TransactionLog::list_for_token(self.db.pool(), token.id, Some(TOKEN_DETAIL_HISTORY)).await?;

        Ok(TokenDetailResponse {
            token,
            wallet_address: wallet.address,
            transactions,
        })
    }

    /// 토큰별 거래 조회 (최신순)
    pub async fn list_transactions(
        &self,
        token_id: u64,
        limit: Option<u32>,
    ) -> Result<TransactionsResponse, LedgerError> {
        let transactions = TransactionLog::list_for_existing_token(self.db.pool(), token_id, limit).await?;

        Ok(TransactionsResponse { token_id, transactions })
    }

    /// 컨트랙트 주소로 토큰 메타데이터 조회
    /// Look up ERC-20 metadata and a market price for a contract
    pub async fn lookup_contract(&self, contract_address: &str) -> Result<ContractTokenResponse, LedgerError> {
        let contract_address = normalize_contract_address(contract_address)?;

        let metadata = self
            .metadata_lookup
            .lookup(&contract_address)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, contract = %contract_address, "contract lookup failed");
                LedgerError::LookupFailed(format!("{:#}", e))
            })?;

        let symbol = normalize_symbol(&metadata.symbol).map_err(|_| {
            LedgerError::LookupFailed(format!(
                "contract {} returned an unusable symbol {:?}",
                contract_address, metadata.symbol
            ))
        })?;

        let price = self.price_service.quote_one(&symbol).await;

        Ok(ContractTokenResponse {
            contract_address,
            symbol,
            name: metadata.name,
            decimals: metadata.decimals,
            price,
        })
    }

    /// 컨트랙트 토큰을 지갑에 추가 (이미 있으면 기존 행 반환)
    /// Import a contract token into a wallet; idempotent per (wallet, symbol)
    pub async fn add_token_by_contract(
        &self,
        wallet_address: &str,
        contract_address: &str,
    ) -> Result<AddTokenResponse, LedgerError> {
        let address = normalize_address(wallet_address)?;
        let wallet = WalletRepository::find_by_address(self.db.pool(), &address)
            .await?
            .ok_or_else(|| LedgerError::WalletNotFound { address: address.clone() })?;

        // 외부 조회는 트랜잭션 밖에서
        let contract = self.lookup_contract(contract_address).await?;

        let template = TokenMetadata {
            name: contract.name.clone(),
            price: contract.price,
            is_forced: false,
            contract_address: Some(contract.contract_address.clone()),
        };

        let mut uow = self.db.begin().await?;
        let result = Self::ensure_imported(uow.conn(), wallet.id, &contract.symbol, &template).await;
        let (token, created) = uow.finish(result).await?;

        let message = if created {
            tracing::info!(
                wallet = %address,
                symbol = %token.symbol,
                contract = %contract.contract_address,
                "token added by contract"
            );
            format!("{} added to wallet", token.symbol)
        } else {
            format!("{} already exists in wallet", token.symbol)
        };

        Ok(AddTokenResponse { token, message })
    }

    async fn ensure_imported(
        conn: &mut sqlx::PgConnection,
        wallet_id: u64,
        symbol: &str,
        template: &TokenMetadata,
    ) -> Result<(Token, bool), LedgerError> {
        if let Some(existing) =
            TokenRepository::find_by_wallet_and_symbol(&mut *conn, wallet_id, symbol).await?
        {
            return Ok((existing, false));
        }

        let token = TokenLedger::ensure_token_row(conn, wallet_id, symbol, Some(template)).await?;
        Ok((token, true))
    }
}
