use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::{internal, ApiError};
use crate::model::{parse_id, District, Id};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub(crate) fn district_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("District with ID {} not found", id))
}

pub(crate) fn block_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Block with ID {} not found", id))
}

// Resolve a district from a raw path segment. `failure` is the message used
// if the store itself errors.
pub(crate) async fn load_district<S: Store>(
    store: &S,
    raw_id: &str,
    failure: &'static str,
) -> Result<District, ApiError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(district_not_found(raw_id));
    };

    store
        .get_district(id)
        .await
        .map_err(internal(failure))?
        .ok_or_else(|| district_not_found(raw_id))
}

// Referential check performed before any block write.
pub(crate) async fn ensure_district_exists<S: Store>(
    store: &S,
    district_id: Id,
    failure: &'static str,
) -> Result<(), ApiError> {
    match store.get_district(district_id).await.map_err(internal(failure))? {
        Some(_) => Ok(()),
        None => Err(district_not_found(district_id)),
    }
}
