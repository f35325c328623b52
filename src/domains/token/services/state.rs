// Token domain state
// 토큰 도메인 상태
use std::sync::Arc;
use std::time::Duration;
use crate::shared::clients::{PriceFeed, TokenMetadataLookup};
use crate::shared::database::Database;
use crate::domains::token::services::{PriceService, TokenService};

/// Token domain state
/// 토큰 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct TokenState {
    pub token_service: TokenService,
}

impl TokenState {
    /// 외부 협력자(가격 피드, 메타데이터 조회)는 주입받음
    pub fn new(
        db: Database,
        price_feed: Arc<dyn PriceFeed>,
        metadata_lookup: Arc<dyn TokenMetadataLookup>,
        price_refresh_timeout: Duration,
    ) -> Self {
        let price_service = PriceService::new(db.clone(), price_feed, price_refresh_timeout);
        Self {
            token_service: TokenService::new(db, price_service, metadata_lookup),
        }
    }
}
