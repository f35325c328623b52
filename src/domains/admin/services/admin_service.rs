use rust_decimal::Decimal;
use sqlx::PgConnection;
use crate::domains::admin::models::{
    BurnResponse, InjectResponse, InjectionKind, InjectionsResponse,
};
use crate::domains::token::services::TokenLedger;
use crate::domains::wallet::services::WalletStore;
use crate::shared::database::{Database, InjectionRepository, TokenRepository};
use crate::shared::errors::LedgerError;
use crate::shared::utils::address_generator::{derive_public_key, generate_private_key, KeyMaterial};
use crate::shared::utils::validation::{normalize_address, normalize_symbol, validate_amount, validate_price};

/// 관리자 개요에 포함되는 최근 발행/소각 기록 수
pub const INJECTION_HISTORY_LIMIT: u32 = 500;

/// 관리자 발행/소각 서비스
/// AdminService: mint (inject) and burn
///
/// 관리자 인증은 호출 전(AdminKey extractor)에 끝난 상태라고 가정
#[derive(Clone)]
pub struct AdminService {
    db: Database,
}

impl AdminService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 발행: 지갑이 없으면 생성, 가격 덮어쓰기, 잔고 증가, 기록 추가
    /// Mint tokens into a wallet (creating the wallet if needed)
    pub async fn inject(
        &self,
        wallet_address: &str,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<InjectResponse, LedgerError> {
        validate_amount(amount)?;
        validate_price(price)?;
        let address = normalize_address(wallet_address)?;
        let symbol = normalize_symbol(symbol)?;

        let mut uow = self.db.begin().await?;
        let result = Self::execute_inject(uow.conn(), &address, &symbol, amount, price).await;
        let response = uow.finish(result).await?;

        tracing::info!(
            wallet = %address,
            symbol = %symbol,
            %amount,
            %price,
            balance = %response.token.balance,
            "tokens injected"
        );

        Ok(response)
    }

    async fn execute_inject(
        conn: &mut PgConnection,
        address: &str,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<InjectResponse, LedgerError> {
        // 관리자가 지정한 주소를 그대로 사용 (키는 새로 생성)
        let private_key = generate_private_key();
        let keys = KeyMaterial {
            public_key: derive_public_key(&private_key),
            private_key,
            address: address.to_string(),
        };
        let resolved = WalletStore::resolve_or_create(&mut *conn, &keys).await?;

        let token = TokenLedger::ensure_token_row(&mut *conn, resolved.wallet.id, symbol, None).await?;
        let token = TokenLedger::adjust_balance(&mut *conn, token.id, amount).await?;
        let token = TokenRepository::set_price(&mut *conn, token.id, price).await?;

        let injection =
            InjectionRepository::insert(&mut *conn, token.id, symbol, InjectionKind::Mint, amount, price).await?;

        Ok(InjectResponse { token, injection })
    }

    /// 소각: 지갑/토큰이 있어야 하고 잔고가 충분해야 함
    /// Burn tokens from an existing wallet
    pub async fn burn(
        &self,
        wallet_address: &str,
        symbol: &str,
        amount: Decimal,
    ) -> Result<BurnResponse, LedgerError> {
        validate_amount(amount)?;
        let address = normalize_address(wallet_address)?;
        let symbol = normalize_symbol(symbol)?;

        let mut uow = self.db.begin().await?;
        let result = Self::execute_burn(uow.conn(), &address, &symbol, amount).await;
        let outcome = uow.finish(result).await;

        match &outcome {
            Ok(response) => tracing::info!(
                wallet = %address,
                symbol = %symbol,
                %amount,
                balance = %response.token.balance,
                "tokens burned"
            ),
            Err(e) if !e.is_internal() => tracing::warn!(
                wallet = %address,
                symbol = %symbol,
                %amount,
                reason = %e,
                "burn rejected"
            ),
            Err(_) => {}
        }

        outcome
    }

    async fn execute_burn(
        conn: &mut PgConnection,
        address: &str,
        symbol: &str,
        amount: Decimal,
    ) -> Result<BurnResponse, LedgerError> {
        let wallet = WalletStore::find(&mut *conn, address)
            .await?
            .ok_or_else(|| LedgerError::WalletNotFound { address: address.to_string() })?;

        let token = TokenRepository::find_by_wallet_and_symbol(&mut *conn, wallet.id, symbol)
            .await?
            .ok_or_else(|| LedgerError::TokenNotFound {
                address: address.to_string(),
                symbol: symbol.to_string(),
            })?;

        // 잔고 검사는 잠금 후 adjust_balance 안에서
        let token = TokenLedger::adjust_balance(&mut *conn, token.id, -amount).await?;

        let burn_record =
            InjectionRepository::insert(&mut *conn, token.id, symbol, InjectionKind::Burn, amount, Decimal::ZERO)
                .await?;

        Ok(BurnResponse { token, burn_record })
    }

    /// 관리자 개요 (가격 고정 토큰 + 최근 기록)
    pub async fn list_injections(&self) -> Result<InjectionsResponse, LedgerError> {
        let forced_tokens = TokenRepository::list_forced(self.db.pool()).await?;
        let injections = InjectionRepository::list_recent(self.db.pool(), INJECTION_HISTORY_LIMIT).await?;

        Ok(InjectionsResponse { forced_tokens, injections })
    }
}
