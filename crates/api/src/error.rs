//! API error types and handling
//!
//! Every failure is reported with HTTP 200 and a JSON body of the form
//! `{ "error": "<message>" }`. Clients only see two messages; the variant is
//! kept for logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shorturl_shared::StoreError;

use crate::validation::ValidationError;

pub const INVALID_URL: &str = "invalid url";
pub const ADDRESS_NOT_FOUND: &str = "invalid url, address doesn't exist";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid url")]
    InvalidUrl,
    #[error("host has no address: {0}")]
    AddressNotFound(String),
    #[error("short url not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Message shown to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            ApiError::AddressNotFound(_) => ADDRESS_NOT_FOUND,
            ApiError::InvalidUrl | ApiError::NotFound | ApiError::Store(_) => INVALID_URL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(err) => tracing::error!("Store error: {}", err),
            other => tracing::debug!("Request rejected: {}", other),
        }

        let body = Json(json!({ "error": self.client_message() }));

        (StatusCode::OK, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::AddressNotFound(host) => ApiError::AddressNotFound(host),
            ValidationError::InvalidUrl(_) => ApiError::InvalidUrl,
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
