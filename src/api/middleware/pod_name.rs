//! Response header identifying the serving pod.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Header carrying the pod name on every response.
pub const POD_NAME_HEADER: &str = "x-pod-name";

/// Adds `X-Pod-Name` to every response so load-balanced clients can tell
/// which replica answered.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), pod_name::layer));
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&state.pod_name) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(POD_NAME_HEADER), value);
    }

    response
}
