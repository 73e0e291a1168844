//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`      - Create a short URL
//! - `GET  /health`       - Health check: DB and cache
//! - `GET  /stats/{code}` - Hit count lookup
//! - `GET  /{code}`       - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Pod name** - `X-Pod-Name` response header
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{pod_name, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router with state and middleware applied.
pub fn router(state: AppState) -> Router {
    api::routes::public_routes()
        .layer(middleware::from_fn_with_state(state.clone(), pod_name::layer))
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] so that `/0000001B/` resolves like `/0000001B`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
