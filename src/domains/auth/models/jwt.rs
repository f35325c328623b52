use serde::{Deserialize, Serialize};
use chrono::{Duration, Utc};

/// JWT Claims
/// sub: 지갑 주소 (세션 주체)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(address: String, expiration_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: address,
            exp: (now + Duration::hours(expiration_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}
