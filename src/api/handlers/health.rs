//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports backend reachability for this pod.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers 200 OK; a down backend is reported in the body, not the
/// status code.
///
/// # Response
///
/// ```json
/// {
///   "redis_status": "OK",
///   "db_status": "DOWN",
///   "pod_name": "pocketurl-7d9c5b6f4-x2x8k"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (cache_up, store_up) = tokio::join!(
        state.url_service.cache_available(),
        state.url_service.store_available()
    );

    Json(HealthResponse {
        redis_status: cache_up.into(),
        db_status: store_up.into(),
        pod_name: state.pod_name.clone(),
    })
}
