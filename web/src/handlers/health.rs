//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::state::LiveState;
use axum::{Json, extract::State, http::StatusCode};
use liveview_core::component::LiveComponent;
use liveview_runtime::{HealthCheck, HealthStatus};

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness based on hub diagnostics.
///
/// # Status Codes
///
/// - 200 OK: Healthy or Degraded
/// - 503 Service Unavailable: Unhealthy
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
///
/// # Response
///
/// ```json
/// {
///   "component": "live_hub",
///   "status": "Healthy",
///   "message": null,
///   "metadata": [["active_sessions", "3"]]
/// }
/// ```
#[allow(clippy::unused_async)]
pub async fn readiness<C: LiveComponent>(
    State(state): State<LiveState<C>>,
) -> (StatusCode, Json<HealthCheck>) {
    let health = state.hub.health();

    let status = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(health))
}
