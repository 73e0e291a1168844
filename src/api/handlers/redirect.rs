//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;
use url::Url;

use crate::domain::entities::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check the cache by short code (a hit is not counted)
/// 2. On miss, decode the code and fetch-and-increment the store record
/// 3. Re-cache with a TTL based on the record's hit count
/// 4. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match state.url_service.resolve_short_url(&code).await? {
        Resolution::Found {
            long_url, source, ..
        } => {
            debug!("Redirecting {} via {:?}", code, source);
            Ok((StatusCode::FOUND, [(header::LOCATION, location(&long_url)?)]))
        }
        Resolution::NotFound => Err(AppError::not_found("URL not found")),
    }
}

/// Builds the `Location` value, percent-encoding URLs stored with raw non-ASCII text.
fn location(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| AppError::internal("Failed to retrieve URL"))
}
