//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub redis_status: ComponentStatus,
    pub db_status: ComponentStatus,
    pub pod_name: String,
}

/// Reachability of a single backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentStatus {
    Ok,
    Down,
}

impl From<bool> for ComponentStatus {
    fn from(up: bool) -> Self {
        if up {
            ComponentStatus::Ok
        } else {
            ComponentStatus::Down
        }
    }
}
