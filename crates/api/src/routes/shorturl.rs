//! Short URL creation and redirect routes

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use shorturl_shared::ShortUrlRecord;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateShortUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Creation body, accepted as JSON or as a urlencoded form.
///
/// Any body that cannot be decoded is rejected as an invalid URL.
pub struct UrlSubmission(pub CreateShortUrlRequest);

#[async_trait]
impl<S> FromRequest<S> for UrlSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = if is_json {
            Json::<CreateShortUrlRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| {
                    tracing::debug!("Rejected JSON body: {}", rejection);
                    ApiError::InvalidUrl
                })?
        } else {
            Form::<CreateShortUrlRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| {
                    tracing::debug!("Rejected form body: {}", rejection);
                    ApiError::InvalidUrl
                })?
        };

        Ok(Self(body))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create (or return the existing) short URL for a submitted URL
pub async fn create_short_url(
    State(state): State<AppState>,
    UrlSubmission(request): UrlSubmission,
) -> ApiResult<Json<ShortUrlRecord>> {
    let raw = request.url.ok_or(ApiError::InvalidUrl)?;
    let original_url = state.validator.validate(&raw).await?;

    if let Some(existing) = state.store.find_by_original(&original_url).await? {
        return Ok(Json(existing));
    }

    let record = state.store.allocate_and_create(&original_url).await?;

    tracing::info!(
        short_url = record.short_url,
        original_url = %record.original_url,
        "Created short URL"
    );

    Ok(Json(record))
}

/// Redirect a short URL to its original URL
pub async fn redirect_short_url(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> ApiResult<Response> {
    let short_url: i64 = short_url.parse().map_err(|_| ApiError::NotFound)?;

    let record = state
        .store
        .find_by_short(short_url)
        .await?
        .ok_or(ApiError::NotFound)?;

    let location = HeaderValue::from_str(&record.original_url).map_err(|_| ApiError::InvalidUrl)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
