//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:5000/0000001B",
///   "code": "0000001B"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, `url` is missing, or the
/// URL is not a valid http/https URL.
/// Returns 500 Internal Server Error if the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;

    let Some(long_url) = payload.url.as_deref() else {
        return Err(AppError::bad_request("Missing URL parameter"));
    };

    payload.validate()?;

    let code = state.url_service.create_short_url(long_url).await?;

    Ok(Json(ShortenResponse {
        short_url: code.to_url(&state.base_url),
        code: code.to_string(),
    }))
}
