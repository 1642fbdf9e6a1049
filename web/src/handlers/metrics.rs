//! Prometheus scrape endpoint.

use crate::{error::AppError, state::LiveState};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use liveview_core::component::LiveComponent;

/// Render installed metrics in Prometheus text format.
///
/// # Errors
///
/// Returns 404 when no recorder was installed.
#[allow(clippy::unused_async)]
pub async fn render<C: LiveComponent>(State(state): State<LiveState<C>>) -> Result<Response, AppError> {
    let metrics = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::not_found("Metrics are disabled"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
        .into_response())
}
