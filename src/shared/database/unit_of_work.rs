use anyhow::{Context, Result};
use sqlx::{PgConnection, Postgres, Transaction};

/// 작업 단위 (하나의 DB 트랜잭션)
/// Unit of work wrapping a single database transaction
///
/// 사용 방법:
/// ```ignore
/// let mut uow = db.begin().await?;
/// let result = do_work(uow.conn()).await;
/// uow.finish(result).await
/// ```
///
/// - 모든 읽기/쓰기는 `conn()`을 통해 수행
/// - `finish`: Ok이면 커밋, Err이면 롤백
/// - 완료하지 않고 drop되면 롤백
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// 트랜잭션 연결
    /// Connection bound to this transaction
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.context("Failed to commit transaction")
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.context("Failed to roll back transaction")
    }

    /// 결과에 따라 커밋/롤백 후 원래 결과 반환
    /// Commit on `Ok`, roll back on `Err`; the original error is preserved
    pub async fn finish<T, E>(self, result: std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
