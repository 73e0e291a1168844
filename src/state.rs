//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;

/// Handles constructed once at startup and shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Public base URL used to compose full short URLs.
    pub base_url: String,
    /// Name of the serving pod, reported by `/health` and `X-Pod-Name`.
    pub pod_name: String,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, base_url: String, pod_name: String) -> Self {
        Self {
            url_service,
            base_url,
            pod_name,
        }
    }
}
