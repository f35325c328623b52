use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// 시장 가격 (USD)
/// Market quote for one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub usd_price: Decimal,
}

/// 시장 가격 피드
/// Market price feed collaborator
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// 심볼 목록의 가격 조회 (응답에 없는 심볼은 결과에서 빠짐)
    /// Quote the given symbols; unknown symbols are simply absent from the map
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, PriceQuote>>;
}

// CoinGecko API 클라이언트
// CoinGecko simple/price client
pub struct CoinGeckoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// 심볼 → CoinGecko ID (모르는 심볼은 소문자 그대로)
/// Map a ticker symbol to a CoinGecko coin id
pub fn coingecko_id(symbol: &str) -> String {
    match symbol {
        "BTC" => "bitcoin".to_string(),
        "ETH" => "ethereum".to_string(),
        "BNB" => "binancecoin".to_string(),
        "USDT" => "tether".to_string(),
        "USDC" => "usd-coin".to_string(),
        "SOL" => "solana".to_string(),
        "XRP" => "ripple".to_string(),
        "TRX" | "TRON" => "tron".to_string(),
        "DOGE" => "dogecoin".to_string(),
        other => other.to_lowercase(),
    }
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
}

/// CoinGecko 응답을 심볼 기준 가격표로 변환
/// Convert a `simple/price` body keyed by coin id into quotes keyed by symbol
fn quotes_from_response(
    symbols: &[String],
    body: HashMap<String, SimplePrice>,
) -> HashMap<String, PriceQuote> {
    symbols
        .iter()
        .filter_map(|symbol| {
            let entry = body.get(&coingecko_id(symbol))?;
            let usd_price = Decimal::from_f64(entry.usd?)?.round_dp(10);

            Some((symbol.clone(), PriceQuote { usd_price }))
        })
        .collect()
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, PriceQuote>> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<String> = symbols.iter().map(|s| coingecko_id(s)).collect();
        let url = format!("{}/simple/price", self.base_url);

        tracing::debug!(ids = %ids.join(","), "requesting price feed");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("ids", ids.join(",")),
                ("vs_currencies", "usd".to_string()),
            ])
            .header("User-Agent", "wallet-api/1.0")
            .send()
            .await
            .context("Failed to send request to price feed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Price feed returned error: {} - {}", status, body);
        }

        let body: HashMap<String, SimplePrice> = response
            .json()
            .await
            .context("Failed to parse price feed response")?;

        Ok(quotes_from_response(symbols, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coingecko_id_mapping() {
        assert_eq!(coingecko_id("BTC"), "bitcoin");
        assert_eq!(coingecko_id("BNB"), "binancecoin");
        assert_eq!(coingecko_id("LINK"), "link");
    }

    #[test]
    fn test_quotes_from_response() {
        let body: HashMap<String, SimplePrice> = serde_json::from_str(
            r#"{
                "bitcoin": {"usd": 67012.5, "usd_24h_change": -1.23456},
                "solana": {"usd_market_cap": 2.0}
            }"#,
        )
        .unwrap();
        let symbols = vec!["BTC".to_string(), "SOL".to_string(), "XYZ".to_string()];

        let quotes = quotes_from_response(&symbols, body);

        assert_eq!(quotes.len(), 1);
        let btc = &quotes["BTC"];
        assert_eq!(btc.usd_price, "67012.5".parse::<Decimal>().unwrap());
    }
}
