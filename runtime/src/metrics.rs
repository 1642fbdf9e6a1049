//! Prometheus metrics for live sessions.
//!
//! Sessions and the hub record through the `metrics` facade; this module
//! installs a Prometheus recorder so the web layer can expose the values.
//!
//! Recorded metrics:
//! - `live_sessions_mounted_total` (counter)
//! - `live_sessions_active` (gauge)
//! - `live_events_total` (counter, labelled by `event`)
//! - `live_events_rejected_total` (counter)
//! - `live_render_duration_seconds` (histogram)
//! - `live_diff_patches` (histogram)
//! - `live_socket_messages_total` (counter, labelled by `type`, recorded by the transport)
//!
//! # Example
//!
//! ```rust,no_run
//! use liveview_runtime::metrics::PrometheusMetrics;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::install()?;
//! let text = metrics.render();
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Installed Prometheus recorder.
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: PrometheusHandle,
}

impl PrometheusMetrics {
    /// Describe all live metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] if the exporter cannot be built or a global
    /// recorder is already installed.
    pub fn install() -> Result<Self, MetricsError> {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?
            .set_buckets_for_metric(
                Matcher::Full("live_diff_patches".to_string()),
                &[0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        register_metrics();
        tracing::info!("Prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Render current metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(
        "live_sessions_mounted_total",
        "Total number of live sessions mounted"
    );
    describe_gauge!(
        "live_sessions_active",
        "Number of currently connected live sessions"
    );
    describe_counter!(
        "live_events_total",
        "Total number of client events handled"
    );
    describe_counter!(
        "live_events_rejected_total",
        "Total number of client events that failed to decode"
    );
    describe_histogram!(
        "live_render_duration_seconds",
        "Time taken to render and diff a component"
    );
    describe_histogram!(
        "live_diff_patches",
        "Number of patches produced per render"
    );
    describe_counter!(
        "live_socket_messages_total",
        "Total number of client messages received over WebSocket"
    );
}
