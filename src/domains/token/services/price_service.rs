use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use rust_decimal::Decimal;
use crate::domains::token::models::Token;
use crate::shared::clients::{PriceFeed, PriceQuote};
use crate::shared::database::{Database, TokenRepository};

/// 시장 가격 갱신 서비스
/// Read-time market price refresh
///
/// - is_forced = false 인 행만 갱신
/// - 피드 호출은 한 번, 설정된 시간 안에 끝나지 않으면 캐시된 가격 사용
/// - 가격 쓰기는 작업 단위 밖에서 실행 (잔고와 무관)
#[derive(Clone)]
pub struct PriceService {
    db: Database,
    price_feed: Arc<dyn PriceFeed>,
    timeout: Duration,
}

impl PriceService {
    pub fn new(db: Database, price_feed: Arc<dyn PriceFeed>, timeout: Duration) -> Self {
        Self { db, price_feed, timeout }
    }

    /// 피드 조회 (실패/시간 초과 시 None)
    /// Quote symbols within the configured bound; failures yield `None`
    pub async fn quote(&self, symbols: &[String]) -> Option<HashMap<String, PriceQuote>> {
        if symbols.is_empty() {
            return None;
        }

        match tokio::time::timeout(self.timeout, self.price_feed.fetch_quotes(symbols)).await {
            Ok(Ok(quotes)) => Some(quotes),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, ?symbols, "price feed request failed, serving cached prices");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    ?symbols,
                    "price feed timed out, serving cached prices"
                );
                None
            }
        }
    }

    /// 단일 심볼 가격 (실패 시 0)
    pub async fn quote_one(&self, symbol: &str) -> Decimal {
        let symbols = vec![symbol.to_string()];
        self.quote(&symbols)
            .await
            .and_then(|quotes| quotes.get(symbol).map(|q| q.usd_price))
            .filter(|price| *price >= Decimal::ZERO)
            .unwrap_or(Decimal::ZERO)
    }

    /// 고정되지 않은 행의 가격을 갱신하고 메모리상의 행에도 반영
    /// Refresh non-forced rows in place
    pub async fn refresh_market_prices(&self, tokens: &mut [Token]) {
        let mut symbols: Vec<String> = tokens
            .iter()
            .filter(|t| !t.is_forced)
            .map(|t| t.symbol.clone())
            .collect();
        symbols.sort();
        symbols.dedup();

        let Some(quotes) = self.quote(&symbols).await else {
            return;
        };

        for token in tokens.iter_mut().filter(|t| !t.is_forced) {
            let Some(quote) = quotes.get(&token.symbol) else {
                continue;
            };
            if quote.usd_price < Decimal::ZERO || quote.usd_price == token.price {
                continue;
            }

            match TokenRepository::set_market_price(self.db.pool(), token.id, quote.usd_price).await {
                Ok(true) => token.price = quote.usd_price,
                // 그 사이 관리자가 가격을 고정함
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, token_id = token.id, "failed to store refreshed price");
                }
            }
        }
    }
}
