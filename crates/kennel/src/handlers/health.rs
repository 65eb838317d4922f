//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (pings the store)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

/// Body of the readiness probe.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when the store answers a ping, 503 otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.dog_repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                healthy: true,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    healthy: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
