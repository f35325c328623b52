use sqlx::{Executor, PgConnection, Postgres};
use rust_decimal::Decimal;
use crate::domains::token::models::{default_metadata, Token, TokenMetadata};
use crate::shared::database::TokenRepository;
use crate::shared::errors::LedgerError;
use crate::shared::utils::validation::max_amount;

/// 토큰 원장
/// Token Ledger
///
/// 역할:
/// - (지갑, 심볼) 잔고 행 조회/생성
/// - 잔고 증감 (음수 잔고 거절)
///
/// 주의:
/// - 변경 연산은 모두 호출자의 작업 단위(트랜잭션) 연결에서 실행
/// - 잔고 검사는 행 잠금(FOR UPDATE) 후 읽은 값으로 수행하고, 검사 통과 후에만 쓰기
/// - 프로세스 내 잔고 캐시 없음
pub struct TokenLedger;

impl TokenLedger {
    /// 잔고 조회 (행이 없으면 0, 행을 만들지 않음)
    /// Read a balance; zero when the row does not exist
    pub async fn get_balance<'e, E>(executor: E, wallet_id: u64, symbol: &str) -> Result<Decimal, LedgerError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let token = TokenRepository::find_by_wallet_and_symbol(executor, wallet_id, symbol).await?;
        Ok(token.map(|t| t.balance).unwrap_or(Decimal::ZERO))
    }

    /// 잔고 행 보장 (없으면 0 잔고로 생성)
    /// Return the existing row or create a zero-balance one
    ///
    /// # Arguments
    /// * `template` - 새 행에 복사할 표시 메타데이터 (보통 송신자 행).
    ///   없으면 카탈로그 또는 심볼 기반 기본값 사용
    pub async fn ensure_token_row(
        conn: &mut PgConnection,
        wallet_id: u64,
        symbol: &str,
        template: Option<&TokenMetadata>,
    ) -> Result<Token, LedgerError> {
        if let Some(existing) =
            TokenRepository::find_by_wallet_and_symbol(&mut *conn, wallet_id, symbol).await?
        {
            return Ok(existing);
        }

        let metadata = match template {
            Some(template) => template.clone(),
            None => default_metadata(symbol),
        };

        if let Some(created) =
            TokenRepository::insert_if_absent(&mut *conn, wallet_id, symbol, &metadata).await?
        {
            tracing::debug!(wallet_id, symbol, token_id = created.id, "created token row");
            return Ok(created);
        }

        // 동시 생성 경쟁에서 진 경우: 상대가 만든 행 사용
        TokenRepository::find_by_wallet_and_symbol(&mut *conn, wallet_id, symbol)
            .await?
            .ok_or_else(|| {
                LedgerError::Internal(format!(
                    "token row for wallet {} / {} vanished after conflict",
                    wallet_id, symbol
                ))
            })
    }

    /// 잔고 증감 (balance += delta)
    /// Apply `balance += delta` under a row lock
    ///
    /// 결과 잔고가 음수이면 아무것도 쓰지 않고 InsufficientBalance 반환
    pub async fn adjust_balance(
        conn: &mut PgConnection,
        token_id: u64,
        delta: Decimal,
    ) -> Result<Token, LedgerError> {
        let token = TokenRepository::lock_by_id(&mut *conn, token_id)
            .await?
            .ok_or(LedgerError::TokenIdNotFound { id: token_id })?;

        let new_balance = token
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::BalanceOverflow { token_id })?;

        if new_balance < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                symbol: token.symbol,
                required: -delta,
                available: token.balance,
            });
        }
        if new_balance >= max_amount() {
            return Err(LedgerError::BalanceOverflow { token_id });
        }

        let updated = TokenRepository::set_balance(&mut *conn, token_id, new_balance).await?;
        Ok(updated)
    }

    /// 여러 행을 id 오름차순으로 잠금 (반대 방향 송금 간 교착 방지)
    /// Lock several rows in ascending id order
    pub async fn lock_in_order(conn: &mut PgConnection, token_ids: &[u64]) -> Result<Vec<Token>, LedgerError> {
        let mut ids = token_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut locked = Vec::with_capacity(ids.len());
        for id in ids {
            let token = TokenRepository::lock_by_id(&mut *conn, id)
                .await?
                .ok_or(LedgerError::TokenIdNotFound { id })?;
            locked.push(token);
        }

        Ok(locked)
    }
}
