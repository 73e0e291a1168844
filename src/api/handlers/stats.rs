//! Handler for hit count lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the durable hit count of a short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// Read-only: looking up the count does not count as a hit.
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
/// Returns 500 Internal Server Error if the store fails.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let hit_count = state
        .url_service
        .hit_count(&code)
        .await?
        .ok_or_else(|| AppError::not_found("URL not found"))?;

    Ok(Json(StatsResponse { code, hit_count }))
}
