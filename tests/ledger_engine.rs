// =====================================================
// 원장 엔진 통합 테스트 (PostgreSQL 필요)
// =====================================================
// 모두 #[ignore]: TEST_DATABASE_URL 설정 후
//   cargo test --test ledger_engine -- --ignored
// =====================================================

mod common;
use common::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use rust_decimal::Decimal;
use wallet_api::domains::admin::models::InjectionKind;
use wallet_api::domains::token::models::{TransactionType, DEFAULT_TOKENS};
use wallet_api::domains::token::services::TokenLedger;
use wallet_api::domains::wallet::models::CreateWalletRequest;
use wallet_api::domains::wallet::services::{KeyGenerator, WalletService};
use wallet_api::shared::config::AppConfig;
use wallet_api::shared::utils::address_generator::{KeyMaterial, MAX_GENERATION_ATTEMPTS};
use wallet_api::shared::database::{InjectionRepository, TokenRepository, TransactionRepository, WalletRepository};
use wallet_api::shared::errors::LedgerError;

// =====================================================
// 지갑 저장소 / 기본 토큰
// =====================================================

/// 테스트: 같은 주소로 두 번 생성해도 지갑 1개, 기본 토큰 행은 카탈로그 수만큼
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_resolve_or_create_is_idempotent() {
    let ctx = setup_test().await;
    let address = fresh_address();

    let first = ctx.create_wallet(&address).await;
    let second = ctx.create_wallet(&address).await;

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.address, second.address);
    assert!(first.private_key.is_some(), "server-generated key is returned once");
    assert!(second.private_key.is_none());

    let wallet = WalletRepository::find_by_address(ctx.db.pool(), &address)
        .await
        .unwrap()
        .expect("wallet exists");
    let tokens = TokenRepository::list_by_wallet(ctx.db.pool(), wallet.id).await.unwrap();
    assert_eq!(tokens.len(), DEFAULT_TOKENS.len());
    assert!(tokens.iter().all(|t| t.balance == Decimal::ZERO && t.is_forced));

    let usdt = tokens.iter().find(|t| t.symbol == "USDT").expect("USDT provisioned");
    assert_eq!(usdt.price, dec("1.00"));
}

/// 테스트: 동시에 같은 주소로 생성해도 지갑 1개
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_concurrent_create_same_address() {
    let ctx = setup_test().await;
    let address = fresh_address();

    let (a, b) = tokio::join!(ctx.create_wallet(&address), ctx.create_wallet(&address));
    assert_eq!(a.address, b.address);
    assert!(a.created ^ b.created, "exactly one call creates the wallet");

    let wallet = WalletRepository::find_by_address(ctx.db.pool(), &address).await.unwrap().unwrap();
    let tokens = TokenRepository::list_by_wallet(ctx.db.pool(), wallet.id).await.unwrap();
    assert_eq!(tokens.len(), DEFAULT_TOKENS.len());
}

/// 테스트: 같은 비밀 키를 두 번 가져오면 같은 지갑
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_import_private_key_resolves_same_wallet() {
    let ctx = setup_test().await;
    let generated = ctx
        .state
        .wallet_state
        .wallet_service
        .create_or_import(CreateWalletRequest::default())
        .await
        .unwrap();
    let private_key = generated.private_key.clone().expect("generated key returned");

    let imported = ctx
        .state
        .wallet_state
        .wallet_service
        .create_or_import(CreateWalletRequest {
            private_key: Some(private_key),
            ..CreateWalletRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(imported.address, generated.address);
    assert!(!imported.created);
}

/// 테스트: 없는 지갑 조회
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_get_wallet_not_found() {
    let ctx = setup_test().await;
    let result = ctx.state.wallet_state.wallet_service.get_wallet(&fresh_address()).await;
    assert!(matches!(result, Err(LedgerError::WalletNotFound { .. })));
}

// =====================================================
// 토큰 원장
// =====================================================

/// 테스트: 생성한 주소가 이미 있으면 새 키로 다시 생성
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_generated_address_collision_is_regenerated() {
    let ctx = setup_test().await;
    let taken = KeyMaterial::generate();
    let original = ctx.create_wallet(&taken.address).await;

    let fresh = KeyMaterial::generate();
    let calls = Arc::new(AtomicU32::new(0));
    let generator: KeyGenerator = {
        let calls = calls.clone();
        let taken = taken.clone();
        let fresh = fresh.clone();
        Arc::new(move || {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                taken.clone()
            } else {
                fresh.clone()
            }
        })
    };
    let service = WalletService::with_key_generator(ctx.db.clone(), generator);

    let response = service
        .create_or_import(CreateWalletRequest::default())
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(response.created);
    assert_eq!(response.address, fresh.address);
    assert_eq!(response.private_key.as_deref(), Some(fresh.private_key.as_str()));

    // 기존 지갑은 그대로
    let existing = ctx.state.wallet_state.wallet_service.get_wallet(&taken.address).await.unwrap();
    assert_eq!(existing.public_key, original.public_key);
}

/// 테스트: 5번 모두 충돌하면 WalletGenerationFailed
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_generation_gives_up_after_max_attempts() {
    let ctx = setup_test().await;
    let taken = KeyMaterial::generate();
    ctx.create_wallet(&taken.address).await;

    let calls = Arc::new(AtomicU32::new(0));
    let generator: KeyGenerator = {
        let calls = calls.clone();
        let taken = taken.clone();
        Arc::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            taken.clone()
        })
    };
    let service = WalletService::with_key_generator(ctx.db.clone(), generator);

    let result = service.create_or_import(CreateWalletRequest::default()).await;

    assert!(matches!(
        result,
        Err(LedgerError::WalletGenerationFailed { attempts: 5 })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), MAX_GENERATION_ATTEMPTS);
}

/// 테스트: 잔고 조회는 행을 만들지 않음
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_get_balance_does_not_create_rows() {
    let ctx = setup_test().await;
    let address = fresh_address();
    let created = ctx.create_wallet(&address).await;
    let wallet = WalletRepository::find_by_address(ctx.db.pool(), &created.address).await.unwrap().unwrap();

    let balance = TokenLedger::get_balance(ctx.db.pool(), wallet.id, "DOGE").await.unwrap();
    assert_eq!(balance, Decimal::ZERO);
    assert!(ctx.token(&address, "DOGE").await.is_none());
}

/// 테스트: 음수 잔고가 되는 증감은 아무것도 쓰지 않음
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_adjust_balance_rejects_negative_result() {
    let ctx = setup_test().await;
    let address = ctx.funded_wallet("USDT", "100", "1.00").await;
    let token = ctx.token(&address, "USDT").await.unwrap();

    let mut uow = ctx.db.begin().await.unwrap();
    let result = TokenLedger::adjust_balance(uow.conn(), token.id, dec("-100.0000000001")).await;
    uow.finish(result.map(|_| ())).await.unwrap_err();

    assert_eq!(ctx.balance(&address, "USDT").await, dec("100"));
}

// =====================================================
// 송금 엔진
// =====================================================

/// 테스트: A 500 USDT → 새 지갑 B로 200 송금
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_transfer_moves_balance_and_logs_both_sides() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "500", "1.00").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;

    let before = ctx.balance(&sender, "USDT").await + ctx.balance(&receiver, "USDT").await;
    let outcome = ctx.transfer(&sender, &receiver, "USDT", "200").await.unwrap();

    assert_eq!(ctx.balance(&sender, "USDT").await, dec("300"));
    assert_eq!(ctx.balance(&receiver, "USDT").await, dec("200"));
    let after = ctx.balance(&sender, "USDT").await + ctx.balance(&receiver, "USDT").await;
    assert_eq!(before, after, "transfer conserves the total");

    assert_eq!(outcome.sender_tx.tx_type, TransactionType::Send);
    assert_eq!(outcome.receiver_tx.tx_type, TransactionType::Receive);
    assert_eq!(outcome.sender_tx.amount, dec("200"));
    assert_eq!(outcome.sender_tx.counterparty_address.as_deref(), Some(receiver.as_str()));

    let sender_history = TransactionRepository::list_by_token(ctx.db.pool(), outcome.sender_token.id, 100)
        .await
        .unwrap();
    let receiver_history = TransactionRepository::list_by_token(ctx.db.pool(), outcome.receiver_token.id, 100)
        .await
        .unwrap();
    assert_eq!(sender_history.len(), 1);
    assert_eq!(receiver_history.len(), 1);
    assert_eq!(receiver_history[0].tx_type, TransactionType::Receive);
}

/// 테스트: 수신자에게 토큰 행이 없으면 송신자 행의 메타데이터로 생성
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_transfer_creates_receiver_row_from_sender_metadata() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("DOGE", "500", "0.25").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;
    assert!(ctx.token(&receiver, "DOGE").await.is_none());

    ctx.transfer(&sender, &receiver, "doge", "200").await.unwrap();

    let sender_row = ctx.token(&sender, "DOGE").await.unwrap();
    let receiver_row = ctx.token(&receiver, "DOGE").await.expect("receiver row created");
    assert_eq!(sender_row.balance, dec("300"));
    assert_eq!(receiver_row.balance, dec("200"));
    assert_eq!(receiver_row.price, sender_row.price);
    assert_eq!(receiver_row.is_forced, sender_row.is_forced);
    assert_eq!(receiver_row.name, sender_row.name);
}

/// 테스트: 잔고 초과 송금은 잔고/거래 기록 모두 그대로
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_transfer_insufficient_balance_changes_nothing() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "100", "1.00").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;

    let result = ctx.transfer(&sender, &receiver, "USDT", "150").await;
    match result {
        Err(LedgerError::InsufficientBalance { required, available, .. }) => {
            assert_eq!(required, dec("150"));
            assert_eq!(available, dec("100"));
        }
        other => panic!("expected InsufficientBalance, got {:?}", other.map(|_| ())),
    }

    assert_eq!(ctx.balance(&sender, "USDT").await, dec("100"));
    assert_eq!(ctx.balance(&receiver, "USDT").await, Decimal::ZERO);

    let sender_token = ctx.token(&sender, "USDT").await.unwrap();
    let receiver_token = ctx.token(&receiver, "USDT").await.unwrap();
    assert!(TransactionRepository::list_by_token(ctx.db.pool(), sender_token.id, 100).await.unwrap().is_empty());
    assert!(TransactionRepository::list_by_token(ctx.db.pool(), receiver_token.id, 100).await.unwrap().is_empty());
}

/// 테스트: 송신자/수신자/토큰 누락
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_transfer_not_found_cases() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "100", "1.00").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;

    let missing_sender = ctx.transfer(&fresh_address(), &receiver, "USDT", "1").await;
    assert!(matches!(missing_sender, Err(LedgerError::SenderNotFound { .. })));

    // 수신 지갑은 자동 생성하지 않음
    let unknown_receiver = fresh_address();
    let missing_receiver = ctx.transfer(&sender, &unknown_receiver, "USDT", "1").await;
    assert!(matches!(missing_receiver, Err(LedgerError::ReceiverNotFound { .. })));
    assert!(
        WalletRepository::find_by_address(ctx.db.pool(), &unknown_receiver).await.unwrap().is_none()
    );

    let missing_token = ctx.transfer(&sender, &receiver, "DOGE", "1").await;
    assert!(matches!(missing_token, Err(LedgerError::TokenNotFound { .. })));

    assert_eq!(ctx.balance(&sender, "USDT").await, dec("100"));
}

/// 테스트: 입력 검증 (DB 변경 없음)
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_transfer_validation() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "100", "1.00").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;

    assert!(matches!(
        ctx.transfer(&sender, &receiver, "USDT", "0").await,
        Err(LedgerError::InvalidAmount { .. })
    ));
    assert!(matches!(
        ctx.transfer(&sender, &receiver, "USDT", "-5").await,
        Err(LedgerError::InvalidAmount { .. })
    ));
    assert!(matches!(
        ctx.transfer(&sender, &sender.to_uppercase().replace("0X", "0x"), "USDT", "5").await,
        Err(LedgerError::SelfTransfer)
    ));

    assert_eq!(ctx.balance(&sender, "USDT").await, dec("100"));
}

/// 테스트: 100 USDT에서 60 + 60 동시 송금 → 하나만 성공, 최종 40
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_concurrent_overdraft_only_one_succeeds() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "100", "1.00").await;
    let receiver_a = fresh_address();
    let receiver_b = fresh_address();
    ctx.create_wallet(&receiver_a).await;
    ctx.create_wallet(&receiver_b).await;

    let (first, second) = tokio::join!(
        ctx.transfer(&sender, &receiver_a, "USDT", "60"),
        ctx.transfer(&sender, &receiver_b, "USDT", "60"),
    );

    let results = [first, second];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let rejections = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::InsufficientBalance { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(rejections, 1);
    assert_eq!(ctx.balance(&sender, "USDT").await, dec("40"));
    assert_eq!(
        ctx.balance(&receiver_a, "USDT").await + ctx.balance(&receiver_b, "USDT").await,
        dec("60")
    );
}

/// 테스트: 반대 방향 동시 송금은 교착 없이 둘 다 성공
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_opposite_transfers_do_not_deadlock() {
    let ctx = setup_test().await;
    let a = ctx.funded_wallet("USDT", "100", "1.00").await;
    let b = ctx.funded_wallet("USDT", "100", "1.00").await;

    for _ in 0..5 {
        let (ab, ba) = tokio::join!(
            ctx.transfer(&a, &b, "USDT", "10"),
            ctx.transfer(&b, &a, "USDT", "5"),
        );
        ab.unwrap();
        ba.unwrap();
    }

    assert_eq!(ctx.balance(&a, "USDT").await, dec("75"));
    assert_eq!(ctx.balance(&b, "USDT").await, dec("125"));
}

// =====================================================
// 관리자 발행/소각
// =====================================================

/// 테스트: 0 잔고 지갑에 100 USDT 발행 → 잔고 100, 기록 1건
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_inject_mints_and_records() {
    let ctx = setup_test().await;
    let address = fresh_address();
    ctx.create_wallet(&address).await;

    let response = ctx
        .state
        .admin_state
        .admin_service
        .inject(&address, "USDT", dec("100"), dec("1.00"))
        .await
        .unwrap();

    assert_eq!(response.token.balance, dec("100"));
    assert_eq!(response.injection.kind, InjectionKind::Mint);
    assert_eq!(response.injection.amount, dec("100"));

    let records = InjectionRepository::list_by_token(ctx.db.pool(), response.token.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, dec("100"));
}

/// 테스트: 발행은 지갑을 생성하고 가격을 덮어씀
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_inject_creates_wallet_and_overwrites_price() {
    let ctx = setup_test().await;
    let address = fresh_address();

    ctx.inject(&address, "ETH", "2", "3000.5").await;

    let wallet = WalletRepository::find_by_address(ctx.db.pool(), &address).await.unwrap();
    assert!(wallet.is_some(), "inject creates the target wallet");

    let eth = ctx.token(&address, "ETH").await.unwrap();
    assert_eq!(eth.balance, dec("2"));
    assert_eq!(eth.price, dec("3000.5"));
    // 기본 토큰도 함께 생성됨
    assert!(ctx.token(&address, "USDT").await.is_some());
}

/// 테스트: 잔고 100에서 150 소각 → InsufficientBalance, 잔고 100 유지
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_burn_more_than_balance_fails() {
    let ctx = setup_test().await;
    let address = ctx.funded_wallet("USDT", "100", "1.00").await;

    let result = ctx
        .state
        .admin_state
        .admin_service
        .burn(&address, "USDT", dec("150"))
        .await;

    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(ctx.balance(&address, "USDT").await, dec("100"));

    let token = ctx.token(&address, "USDT").await.unwrap();
    let records = InjectionRepository::list_by_token(ctx.db.pool(), token.id).await.unwrap();
    assert!(records.iter().all(|r| r.kind == InjectionKind::Mint));
}

/// 테스트: 소각 성공 → 기록 kind=burn, price=0
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_burn_records_burn_entry() {
    let ctx = setup_test().await;
    let address = ctx.funded_wallet("USDT", "100", "1.00").await;

    let response = ctx
        .state
        .admin_state
        .admin_service
        .burn(&address, "USDT", dec("40"))
        .await
        .unwrap();

    assert_eq!(response.token.balance, dec("60"));
    assert_eq!(response.burn_record.kind, InjectionKind::Burn);
    assert_eq!(response.burn_record.amount, dec("40"));
    assert_eq!(response.burn_record.price, Decimal::ZERO);
}

/// 테스트: 소각은 지갑/토큰을 만들지 않음
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_burn_not_found_cases() {
    let ctx = setup_test().await;
    let admin = &ctx.state.admin_state.admin_service;

    let unknown = fresh_address();
    assert!(matches!(
        admin.burn(&unknown, "USDT", dec("1")).await,
        Err(LedgerError::WalletNotFound { .. })
    ));
    assert!(WalletRepository::find_by_address(ctx.db.pool(), &unknown).await.unwrap().is_none());

    let address = fresh_address();
    ctx.create_wallet(&address).await;
    assert!(matches!(
        admin.burn(&address, "DOGE", dec("1")).await,
        Err(LedgerError::TokenNotFound { .. })
    ));
}

/// 테스트: 관리자 개요에 가격 고정 토큰과 최근 기록 포함
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_injections_includes_recent_records() {
    let ctx = setup_test().await;
    let address = ctx.funded_wallet("USDT", "7", "1.00").await;
    let token = ctx.token(&address, "USDT").await.unwrap();

    let overview = ctx.state.admin_state.admin_service.list_injections().await.unwrap();
    assert!(overview.forced_tokens.iter().all(|t| t.is_forced));
    assert!(overview.forced_tokens.iter().any(|t| t.id == token.id));
    assert!(overview.injections.iter().any(|r| r.token_id == token.id));
}

// =====================================================
// 조회 / 가격 갱신 / 컨트랙트 토큰
// =====================================================

/// 테스트: 거래 목록은 최신순, limit 적용
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_transactions_newest_first() {
    let ctx = setup_test().await;
    let sender = ctx.funded_wallet("USDT", "100", "1.00").await;
    let receiver = fresh_address();
    ctx.create_wallet(&receiver).await;

    for amount in ["1", "2", "3"] {
        ctx.transfer(&sender, &receiver, "USDT", amount).await.unwrap();
    }

    let token = ctx.token(&sender, "USDT").await.unwrap();
    let service = &ctx.state.token_state.token_service;

    let all = service.list_transactions(token.id, None).await.unwrap();
    let amounts: Vec<Decimal> = all.transactions.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec("3"), dec("2"), dec("1")]);

    let limited = service.list_transactions(token.id, Some(2)).await.unwrap();
    assert_eq!(limited.transactions.len(), 2);

    let detail = service.get_token(token.id).await.unwrap();
    assert_eq!(detail.wallet_address, sender);
    assert_eq!(detail.transactions.len(), 3);

    assert!(matches!(
        service.list_transactions(u32::MAX as u64 * 4, None).await,
        Err(LedgerError::TokenIdNotFound { .. })
    ));
}

/// 테스트: 조회 시 고정되지 않은 토큰만 시장 가격으로 갱신
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_tokens_refreshes_market_prices() {
    let feed = Arc::new(StaticPriceFeed::new(&[("DOGE", "0.30"), ("USDT", "0.99")]));
    let ctx = setup_test_with_feed(feed).await;
    let address = ctx.funded_wallet("DOGE", "10", "0.25").await;

    let listed = ctx.state.token_state.token_service.list_tokens(&address).await.unwrap();

    let doge = listed.tokens.iter().find(|t| t.symbol == "DOGE").unwrap();
    let usdt = listed.tokens.iter().find(|t| t.symbol == "USDT").unwrap();
    assert_eq!(doge.price, dec("0.30"));
    assert_eq!(usdt.price, dec("1.00"), "forced price is never refreshed");

    // DB에도 반영됨
    assert_eq!(ctx.token(&address, "DOGE").await.unwrap().price, dec("0.30"));
}

/// 테스트: 가격 피드 실패 시 캐시된 가격으로 응답
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_tokens_survives_feed_failure() {
    let ctx = setup_test_with_feed(Arc::new(FailingPriceFeed)).await;
    let address = ctx.funded_wallet("DOGE", "10", "0.25").await;

    let listed = ctx.state.token_state.token_service.list_tokens(&address).await.unwrap();
    let doge = listed.tokens.iter().find(|t| t.symbol == "DOGE").unwrap();
    assert_eq!(doge.price, dec("0.25"));
    assert_eq!(doge.balance, dec("10"));
}

/// 테스트: 느린 가격 피드는 설정된 시간 안에 포기하고 캐시된 가격으로 응답
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_list_tokens_is_bounded_by_refresh_timeout() {
    let config = AppConfig {
        price_refresh_timeout: Duration::from_millis(200),
        ..test_config()
    };
    let feed = Arc::new(SlowPriceFeed { delay: Duration::from_secs(10) });
    let ctx = setup_test_with(feed, config).await;
    let address = ctx.funded_wallet("DOGE", "10", "0.25").await;

    let started = Instant::now();
    let listed = ctx.state.token_state.token_service.list_tokens(&address).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(3), "list_tokens waited {:?}", elapsed);
    let doge = listed.tokens.iter().find(|t| t.symbol == "DOGE").unwrap();
    assert_eq!(doge.price, dec("0.25"));
    assert_eq!(ctx.token(&address, "DOGE").await.unwrap().price, dec("0.25"));
}

/// 테스트: 컨트랙트 토큰 추가는 (지갑, 심볼)마다 한 번
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_add_token_by_contract_is_idempotent() {
    let ctx = setup_test().await;
    let address = fresh_address();
    ctx.create_wallet(&address).await;
    let service = &ctx.state.token_state.token_service;

    let first = service.add_token_by_contract(&address, MOCK_CONTRACT).await.unwrap();
    let second = service.add_token_by_contract(&address, MOCK_CONTRACT).await.unwrap();

    assert_eq!(first.token.id, second.token.id);
    assert_eq!(first.token.symbol, "MOCK");
    assert_eq!(first.token.balance, Decimal::ZERO);
    assert!(!first.token.is_forced);
    assert_eq!(first.token.contract_address.as_deref(), Some(MOCK_CONTRACT));

    let unknown = service
        .add_token_by_contract(&address, "0x0000000000000000000000000000000000000001")
        .await;
    assert!(matches!(unknown, Err(LedgerError::LookupFailed(_))));
}
