use rust_decimal::Decimal;
use sqlx::PgConnection;
use crate::domains::token::models::{TokenMetadata, TransactionStatus, TransactionType};
use crate::domains::token::services::{TokenLedger, TransactionLog};
use crate::domains::transfer::models::TransferOutcome;
use crate::domains::wallet::services::WalletStore;
use crate::shared::database::{Database, TokenRepository};
use crate::shared::errors::LedgerError;
use crate::shared::utils::validation::{normalize_address, normalize_symbol, validate_amount};

/// 송금 엔진
/// TransferService: moves a token balance between two existing wallets
///
/// 정책:
/// - 송신/수신 지갑 모두 미리 존재해야 함 (자동 생성 없음)
/// - 수신자 토큰 행이 없으면 송신자 행의 메타데이터로 생성
/// - 잔고 변경 2건 + 거래 기록 2건은 하나의 트랜잭션 (전부 반영 또는 전부 취소)
#[derive(Clone)]
pub struct TransferService {
    db: Database,
}

impl TransferService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 송금 실행
    /// Execute a transfer
    pub async fn transfer(
        &self,
        sender_address: &str,
        receiver_address: &str,
        symbol: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        // 1. 입력 검증 (DB 접근 전)
        validate_amount(amount)?;
        let sender = normalize_address(sender_address)?;
        let receiver = normalize_address(receiver_address)?;
        let symbol = normalize_symbol(symbol)?;

        if sender == receiver {
            return Err(LedgerError::SelfTransfer);
        }

        // 2. 하나의 작업 단위에서 실행
        let mut uow = self.db.begin().await?;
        let result = Self::execute(uow.conn(), &sender, &receiver, &symbol, amount).await;
        let outcome = uow.finish(result).await;

        match &outcome {
            Ok(done) => tracing::info!(
                sender = %sender,
                receiver = %receiver,
                symbol = %symbol,
                %amount,
                sender_balance = %done.sender_token.balance,
                "transfer completed"
            ),
            Err(e) if !e.is_internal() => tracing::warn!(
                sender = %sender,
                receiver = %receiver,
                symbol = %symbol,
                %amount,
                reason = %e,
                "transfer rejected"
            ),
            Err(_) => {}
        }

        outcome
    }

    async fn execute(
        conn: &mut PgConnection,
        sender: &str,
        receiver: &str,
        symbol: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        let sender_wallet = WalletStore::find(&mut *conn, sender)
            .await?
            .ok_or_else(|| LedgerError::SenderNotFound { address: sender.to_string() })?;

        let receiver_wallet = WalletStore::find(&mut *conn, receiver)
            .await?
            .ok_or_else(|| LedgerError::ReceiverNotFound { address: receiver.to_string() })?;

        let sender_token = TokenRepository::find_by_wallet_and_symbol(&mut *conn, sender_wallet.id, symbol)
            .await?
            .ok_or_else(|| LedgerError::TokenNotFound {
                address: sender.to_string(),
                symbol: symbol.to_string(),
            })?;

        // 빠른 거절 (쓰기 전). 최종 검사는 잠금 후 adjust_balance에서
        if sender_token.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                symbol: symbol.to_string(),
                required: amount,
                available: sender_token.balance,
            });
        }

        let template = TokenMetadata::from(&sender_token);
        let receiver_token =
            TokenLedger::ensure_token_row(&mut *conn, receiver_wallet.id, symbol, Some(&template)).await?;

        // 두 행을 id 순서로 잠근 뒤 증감
        TokenLedger::lock_in_order(&mut *conn, &[sender_token.id, receiver_token.id]).await?;
        let sender_token = TokenLedger::adjust_balance(&mut *conn, sender_token.id, -amount).await?;
        let receiver_token = TokenLedger::adjust_balance(&mut *conn, receiver_token.id, amount).await?;

        let sender_tx = TransactionLog::record(
            &mut *conn,
            sender_wallet.id,
            sender_token.id,
            TransactionType::Send,
            amount,
            TransactionStatus::Completed,
            Some(receiver),
        )
        .await?;

        let receiver_tx = TransactionLog::record(
            &mut *conn,
            receiver_wallet.id,
            receiver_token.id,
            TransactionType::Receive,
            amount,
            TransactionStatus::Completed,
            Some(sender),
        )
        .await?;

        Ok(TransferOutcome {
            sender_tx,
            receiver_tx,
            sender_token,
            receiver_token,
        })
    }
}
