use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// JSON body for partial updates. A request without a body (no bytes, or
/// only whitespace, with or without a content type) reads as `T::default()`,
/// meaning "change nothing". Anything else must be valid JSON for `T`.
#[derive(Debug, Clone, Default)]
pub struct UpdateBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for UpdateBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}
