// 요청 값 검증/정규화
// Input validation shared by the ledger engines

use rust_decimal::Decimal;
use crate::shared::errors::LedgerError;
use crate::shared::utils::address_generator::ADDRESS_HEX_LEN;

/// 저장 가능한 소수점 자릿수 (NUMERIC(28, 10))
pub const MAX_FRACTION_DIGITS: u32 = 10;

/// 심볼 최대 길이
pub const MAX_SYMBOL_LEN: usize = 16;

/// 잔고/수량 상한 (정수부 18자리)
/// Upper bound for any stored amount
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000_000, 0)
}

/// 주소 정규화: 0x + 40 hex, 소문자
/// Normalize a wallet address to lowercase `0x` + 40 hex
pub fn normalize_address(raw: &str) -> Result<String, LedgerError> {
    parse_hex_address(raw).ok_or_else(|| LedgerError::InvalidAddress {
        address: raw.to_string(),
    })
}

/// 컨트랙트 주소 정규화 (형식은 지갑 주소와 같음)
pub fn normalize_contract_address(raw: &str) -> Result<String, LedgerError> {
    parse_hex_address(raw).ok_or_else(|| LedgerError::InvalidContractAddress {
        address: raw.to_string(),
    })
}

fn parse_hex_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))?;

    if hex_part.len() != ADDRESS_HEX_LEN || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Some(format!("0x{}", hex_part.to_ascii_lowercase()))
}

/// 심볼 정규화: 공백 제거, 대문자, 영숫자 1~16자
/// Normalize a token symbol
pub fn normalize_symbol(raw: &str) -> Result<String, LedgerError> {
    let symbol = raw.trim().to_ascii_uppercase();

    if symbol.is_empty()
        || symbol.len() > MAX_SYMBOL_LEN
        || !symbol.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(LedgerError::InvalidSymbol { symbol: raw.to_string() });
    }

    Ok(symbol)
}

/// 수량 검증: 0 초과, 소수점 10자리 이하, 상한 미만
/// Validate a transfer/mint/burn amount
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            reason: format!("amount must be greater than 0, got {}", amount),
        });
    }
    check_precision(amount).map_err(|reason| LedgerError::InvalidAmount { reason })
}

/// 가격 검증: 0 이상
/// Validate a price
pub fn validate_price(price: Decimal) -> Result<(), LedgerError> {
    if price < Decimal::ZERO {
        return Err(LedgerError::InvalidPrice {
            reason: format!("price must not be negative, got {}", price),
        });
    }
    check_precision(price).map_err(|reason| LedgerError::InvalidPrice { reason })
}

fn check_precision(value: Decimal) -> Result<(), String> {
    if value.normalize().scale() > MAX_FRACTION_DIGITS {
        return Err(format!(
            "at most {} fractional digits are supported, got {}",
            MAX_FRACTION_DIGITS, value
        ));
    }
    if value >= max_amount() {
        return Err(format!("value {} exceeds the supported maximum", value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("  0xaA8E23Fb1079EA71e0a56F48a2aA51851D8433D0 ").unwrap(),
            "0xaa8e23fb1079ea71e0a56f48a2aa51851d8433d0"
        );
        assert!(normalize_address("aa8e23fb1079ea71e0a56f48a2aa51851d8433d0").is_err());
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address("0xzz8e23fb1079ea71e0a56f48a2aa51851d8433d0").is_err());
    }

    #[test]
    fn test_contract_address_error_kind() {
        let err = normalize_contract_address("not-an-address").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidContractAddress { .. }));
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" usdt ").unwrap(), "USDT");
        assert!(normalize_symbol("").is_err());
        assert!(normalize_symbol("US DT").is_err());
        assert!(normalize_symbol("ABCDEFGHIJKLMNOPQ").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::new(100, 0)).is_ok());
        assert!(validate_amount(Decimal::new(1, 10)).is_ok());
        assert!(validate_amount(Decimal::new(10, 11)).is_ok()); // 1.0e-10 정규화 후 10자리
        assert!(matches!(
            validate_amount(Decimal::ZERO),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert!(validate_amount(Decimal::new(-5, 0)).is_err());
        assert!(validate_amount(Decimal::new(1, 11)).is_err());
        assert!(validate_amount(max_amount()).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(10270005, 2)).is_ok());
        assert!(matches!(
            validate_price(Decimal::new(-1, 2)),
            Err(LedgerError::InvalidPrice { .. })
        ));
    }
}
