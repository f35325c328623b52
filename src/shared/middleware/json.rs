use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use crate::shared::errors::LedgerError;

/// 요청 본문 extractor
/// JSON body extractor whose rejections use the ledger error body
///
/// 형식 오류, 필드 누락, 모르는 필드(deny_unknown_fields) 모두 400 MissingFields
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(LedgerError::MissingFields(rejection.body_text()).into()),
        }
    }
}
