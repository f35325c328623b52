use rust_decimal::Decimal;
use crate::domains::token::models::TokenMetadata;

/// 기본 토큰 카탈로그 항목
/// Default catalog entry seeded into every new wallet
#[derive(Debug, Clone, Copy)]
pub struct CatalogToken {
    pub symbol: &'static str,
    pub name: &'static str,
    price_units: i64,
    price_scale: u32,
}

impl CatalogToken {
    const fn new(symbol: &'static str, name: &'static str, price_units: i64, price_scale: u32) -> Self {
        Self { symbol, name, price_units, price_scale }
    }

    /// 고정 기준 가격
    /// Fixed reference price
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_units, self.price_scale)
    }

    /// 카탈로그 토큰은 모두 가격 고정
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.to_string(),
            price: self.price(),
            is_forced: true,
            contract_address: None,
        }
    }
}

/// 지갑 생성 시 0 잔고로 생성되는 토큰 목록
/// Tokens provisioned with zero balance on wallet creation
pub const DEFAULT_TOKENS: [CatalogToken; 4] = [
    CatalogToken::new("USDT", "Tether USD", 100, 2),
    CatalogToken::new("BTC", "Bitcoin", 10_270_005, 2),
    CatalogToken::new("ETH", "Ethereum", 235_010, 2),
    CatalogToken::new("BNB", "Binance Coin", 63_520, 2),
];

/// 심볼로 카탈로그 항목 조회
/// Find a catalog entry by (normalized) symbol
pub fn find_catalog_token(symbol: &str) -> Option<&'static CatalogToken> {
    DEFAULT_TOKENS.iter().find(|t| t.symbol == symbol)
}

/// 템플릿이 없을 때 새 행에 사용할 메타데이터
/// Metadata for a new row when no template token is given:
/// catalog entry if known, otherwise a non-forced row named after the symbol
pub fn default_metadata(symbol: &str) -> TokenMetadata {
    match find_catalog_token(symbol) {
        Some(entry) => entry.metadata(),
        None => TokenMetadata {
            name: symbol.to_string(),
            price: Decimal::ZERO,
            is_forced: false,
            contract_address: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let symbols: Vec<&str> = DEFAULT_TOKENS.iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["USDT", "BTC", "ETH", "BNB"]);
        assert_eq!(DEFAULT_TOKENS[0].price(), Decimal::ONE);
        assert_eq!(DEFAULT_TOKENS[1].price(), "102700.05".parse::<Decimal>().unwrap());
        assert!(DEFAULT_TOKENS.iter().all(|t| t.metadata().is_forced));
    }

    #[test]
    fn test_default_metadata_for_unknown_symbol() {
        let meta = default_metadata("DOGE");
        assert_eq!(meta.name, "DOGE");
        assert_eq!(meta.price, Decimal::ZERO);
        assert!(!meta.is_forced);

        assert_eq!(default_metadata("ETH").name, "Ethereum");
    }
}
