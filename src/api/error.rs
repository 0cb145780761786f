use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::envelope::ErrorEnvelope;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body is malformed or misses required fields
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Store failure. `message` is all the client sees; `source` is logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, source } = &self {
            log::error!("{}: {}", message, source);
        }

        (self.status(), Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

/// Map any store failure to an internal error carrying `message`.
pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |source| ApiError::Internal { message, source }
}

/// Map a failed write: unique violations become a conflict with
/// `conflict`, everything else an internal error carrying `message`.
pub fn write_failure(
    conflict: &'static str,
    message: &'static str,
) -> impl FnOnce(StoreError) -> ApiError {
    move |source| {
        if source.is_unique_violation() {
            ApiError::Conflict(conflict.to_string())
        } else {
            ApiError::Internal { message, source }
        }
    }
}
