use thiserror::Error;
use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;

/// 원장(지갑/토큰/거래) 관련 에러
/// Ledger errors (wallet, token balance, transfer, mint/burn)
#[derive(Error, Debug)]
pub enum LedgerError {
    /// 잘못된 수량 (0 이하, 소수점 자릿수 초과 등)
    /// Invalid amount
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// 잘못된 가격
    /// Invalid price
    #[error("Invalid price: {reason}")]
    InvalidPrice { reason: String },

    #[error("Invalid token symbol: {symbol:?}")]
    InvalidSymbol { symbol: String },

    #[error("Invalid wallet address: {address:?}")]
    InvalidAddress { address: String },

    /// 요청 본문 필드 누락/형식 오류
    /// Missing or malformed request fields
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Sender and receiver must be different wallets")]
    SelfTransfer,

    #[error("Wallet not found: {address}")]
    WalletNotFound { address: String },

    /// 송신 지갑 없음 (송금은 송신자를 자동 생성하지 않음)
    /// Sender wallet not found
    #[error("Sender wallet not found: {address}")]
    SenderNotFound { address: String },

    /// 수신 지갑 없음 (수신 지갑은 미리 존재해야 함)
    /// Receiver wallet not found
    #[error("Receiver wallet not found: {address}")]
    ReceiverNotFound { address: String },

    #[error("Token {symbol} not found in wallet {address}")]
    TokenNotFound { address: String, symbol: String },

    #[error("Token not found: id={id}")]
    TokenIdNotFound { id: u64 },

    /// 잔고 부족 (비즈니스 규칙 거절)
    /// Insufficient balance (business-rule rejection)
    #[error("Insufficient {symbol} balance: required {required}, available {available}")]
    InsufficientBalance {
        symbol: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("Balance overflow for token id={token_id}")]
    BalanceOverflow { token_id: u64 },

    /// 지갑 주소 생성 실패 (재시도 초과)
    /// Could not generate a unique wallet address
    #[error("Failed to generate a unique wallet address after {attempts} attempts")]
    WalletGenerationFailed { attempts: u32 },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid contract address: {address:?}")]
    InvalidContractAddress { address: String },

    /// 외부 토큰 메타데이터 조회 실패
    /// External token metadata lookup failed
    #[error("Token lookup failed: {0}")]
    LookupFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// HTTP 상태 코드
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidPrice { .. }
            | LedgerError::InvalidSymbol { .. }
            | LedgerError::InvalidAddress { .. }
            | LedgerError::MissingFields(_)
            | LedgerError::SelfTransfer
            | LedgerError::InvalidContractAddress { .. } => StatusCode::BAD_REQUEST,
            LedgerError::Unauthorized => StatusCode::UNAUTHORIZED,
            LedgerError::Forbidden(_) => StatusCode::FORBIDDEN,
            LedgerError::WalletNotFound { .. }
            | LedgerError::SenderNotFound { .. }
            | LedgerError::ReceiverNotFound { .. }
            | LedgerError::TokenNotFound { .. }
            | LedgerError::TokenIdNotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::InsufficientBalance { .. } | LedgerError::BalanceOverflow { .. } => {
                StatusCode::CONFLICT
            }
            LedgerError::LookupFailed(_) => StatusCode::BAD_GATEWAY,
            LedgerError::WalletGenerationFailed { .. }
            | LedgerError::DatabaseError(_)
            | LedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 스토리지/내부 오류 여부 (상세 내용은 로그에만 남김)
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Repository 에러(anyhow)는 스토리지 오류로 취급
/// Repository failures surface as storage errors
impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        LedgerError::DatabaseError(format!("{:#}", err))
    }
}

/// LedgerError를 HTTP 응답으로 변환
impl From<LedgerError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: LedgerError) -> Self {
        let status = err.status_code();
        let message = if err.is_internal() {
            tracing::error!(error = %err, "ledger operation failed");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        (status, Json(json!({ "error": message })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            LedgerError::InvalidAmount { reason: "zero".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LedgerError::SenderNotFound { address: "0x1".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                symbol: "USDT".into(),
                required: Decimal::new(150, 0),
                available: Decimal::new(100, 0),
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(LedgerError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            LedgerError::LookupFailed("rpc down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = LedgerError::from(anyhow::anyhow!("connection refused to 10.0.0.5"));
        let (status, Json(body)) = <(StatusCode, Json<serde_json::Value>)>::from(err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_business_errors_keep_message() {
        let err = LedgerError::InsufficientBalance {
            symbol: "USDT".into(),
            required: Decimal::new(150, 0),
            available: Decimal::new(100, 0),
        };
        let (_, Json(body)) = <(StatusCode, Json<serde_json::Value>)>::from(err);

        assert_eq!(
            body["error"],
            "Insufficient USDT balance: required 150, available 100"
        );
    }
}
