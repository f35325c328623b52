// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 원장 통합 테스트에서 공통으로 사용하는 셋업 함수와 가짜 협력자 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let ctx = setup_test().await;
//     // 테스트 코드...
// }
// ```
//
// - DB 테스트는 #[ignore] 로 표시, TEST_DATABASE_URL 설정 후 --ignored 로 실행
//   (설정 없이 실행하면 바로 실패)
// - 테스트마다 새 주소를 쓰므로 데이터 정리 없이 병렬 실행 가능
// =====================================================
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use rust_decimal::Decimal;
use wallet_api::domains::token::models::Token;
use wallet_api::domains::wallet::models::{CreateWalletRequest, CreateWalletResponse};
use wallet_api::shared::clients::{ContractMetadata, PriceFeed, PriceQuote, TokenMetadataLookup};
use wallet_api::shared::config::AppConfig;
use wallet_api::shared::database::{Database, TokenRepository, WalletRepository};
use wallet_api::shared::services::AppState;
use wallet_api::shared::utils::address_generator::KeyMaterial;

pub const TEST_DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";
pub const TEST_ADMIN_KEY: &str = "test-admin-key";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

// 가짜 컨트랙트 (조회 시 항상 같은 메타데이터 반환)
pub const MOCK_CONTRACT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("invalid decimal literal")
}

/// 고정 가격표 피드
pub struct StaticPriceFeed {
    prices: HashMap<String, Decimal>,
}

impl StaticPriceFeed {
    pub fn new(prices: &[(&str, &str)]) -> Self {
        Self {
            prices: prices.iter().map(|(s, p)| (s.to_string(), dec(p))).collect(),
        }
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch_quotes(&self, symbols: &[String]) -> anyhow::Result<HashMap<String, PriceQuote>> {
        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                self.prices.get(symbol).map(|price| {
                    (
                        symbol.clone(),
                        PriceQuote { usd_price: *price },
                    )
                })
            })
            .collect())
    }
}

/// 항상 실패하는 피드
pub struct FailingPriceFeed;

#[async_trait]
impl PriceFeed for FailingPriceFeed {
    async fn fetch_quotes(&self, _symbols: &[String]) -> anyhow::Result<HashMap<String, PriceQuote>> {
        anyhow::bail!("price feed unavailable")
    }
}

/// 응답 전에 오래 멈추는 피드 (시간 제한 확인용)
pub struct SlowPriceFeed {
    pub delay: Duration,
}

#[async_trait]
impl PriceFeed for SlowPriceFeed {
    async fn fetch_quotes(&self, symbols: &[String]) -> anyhow::Result<HashMap<String, PriceQuote>> {
        tokio::time::sleep(self.delay).await;
        Ok(symbols
            .iter()
            .map(|symbol| (symbol.clone(), PriceQuote { usd_price: dec("999") }))
            .collect())
    }
}

/// MOCK_CONTRACT 만 아는 메타데이터 조회
pub struct StaticMetadataLookup;

#[async_trait]
impl TokenMetadataLookup for StaticMetadataLookup {
    async fn lookup(&self, contract_address: &str) -> anyhow::Result<ContractMetadata> {
        if contract_address == MOCK_CONTRACT {
            Ok(ContractMetadata {
                symbol: "MOCK".to_string(),
                name: "Mock Token".to_string(),
                decimals: 6,
            })
        } else {
            anyhow::bail!("execution reverted")
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        admin_key: TEST_ADMIN_KEY.to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub fn test_state(db: Database, config: &AppConfig, price_feed: Arc<dyn PriceFeed>) -> AppState {
    AppState::with_collaborators(db, config, price_feed, Arc::new(StaticMetadataLookup))
}

pub struct TestContext {
    pub db: Database,
    pub state: AppState,
}

/// 테스트 전 초기화
///
/// TEST_DATABASE_URL 이 없으면 panic
pub async fn setup_test() -> TestContext {
    setup_test_with_feed(Arc::new(StaticPriceFeed::new(&[]))).await
}

pub async fn setup_test_with_feed(price_feed: Arc<dyn PriceFeed>) -> TestContext {
    setup_test_with(price_feed, test_config()).await
}

pub async fn setup_test_with(price_feed: Arc<dyn PriceFeed>, config: AppConfig) -> TestContext {
    let url = std::env::var(TEST_DATABASE_URL_ENV)
        .expect("TEST_DATABASE_URL must be set to run database tests");

    // 1. 데이터베이스 연결
    let db = Database::new(&url, 10)
        .await
        .expect("Failed to connect to database");

    // 2. 마이그레이션 실행
    db.initialize()
        .await
        .expect("Failed to initialize database");

    let state = test_state(db.clone(), &config, price_feed);
    TestContext { db, state }
}

/// 아직 쓰이지 않은 랜덤 주소
pub fn fresh_address() -> String {
    KeyMaterial::generate().address
}

impl TestContext {
    /// 주소를 지정해 지갑 생성
    pub async fn create_wallet(&self, address: &str) -> CreateWalletResponse {
        self.state
            .wallet_state
            .wallet_service
            .create_or_import(CreateWalletRequest {
                address: Some(address.to_string()),
                ..CreateWalletRequest::default()
            })
            .await
            .expect("Failed to create wallet")
    }

    /// 새 지갑 + 잔고 지급
    pub async fn funded_wallet(&self, symbol: &str, amount: &str, price: &str) -> String {
        let address = fresh_address();
        self.create_wallet(&address).await;
        self.inject(&address, symbol, amount, price).await;
        address
    }

    pub async fn inject(&self, address: &str, symbol: &str, amount: &str, price: &str) {
        self.state
            .admin_state
            .admin_service
            .inject(address, symbol, dec(amount), dec(price))
            .await
            .expect("Failed to inject tokens");
    }

    pub async fn token(&self, address: &str, symbol: &str) -> Option<Token> {
        let wallet = WalletRepository::find_by_address(self.db.pool(), address)
            .await
            .expect("Failed to fetch wallet")?;
        TokenRepository::find_by_wallet_and_symbol(self.db.pool(), wallet.id, symbol)
            .await
            .expect("Failed to fetch token")
    }

    /// 잔고 (행이 없으면 0)
    pub async fn balance(&self, address: &str, symbol: &str) -> Decimal {
        self.token(address, symbol)
            .await
            .map(|t| t.balance)
            .unwrap_or(Decimal::ZERO)
    }

    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        symbol: &str,
        amount: &str,
    ) -> Result<wallet_api::domains::transfer::models::TransferOutcome, wallet_api::shared::errors::LedgerError> {
        self.state
            .transfer_state
            .transfer_service
            .transfer(sender, receiver, symbol, dec(amount))
            .await
    }
}
