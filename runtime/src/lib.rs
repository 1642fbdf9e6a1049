//! # LiveView Runtime
//!
//! Runtime implementation for live components.
//!
//! This crate drives a [`LiveComponent`] through its lifecycle for each
//! connected client and turns every state change into a minimal list of
//! render-tree patches.
//!
//! ## Core Components
//!
//! - **`LiveSession`**: Owns one connection's state and last rendered tree
//! - **`LiveHub`**: Tells sessions when another session changed shared data
//! - **Health**: Liveness/readiness reporting for the hosting server
//! - **Metrics**: Prometheus recorder for session and render metrics
//!
//! ## Example
//!
//! ```ignore
//! use liveview_runtime::{LiveHub, LiveSession};
//! use std::sync::Arc;
//!
//! let hub = LiveHub::new(64);
//! let registration = hub.register();
//! let mut session = LiveSession::mount(Arc::new(component), registration.id(), &params);
//!
//! // Initial HTML for the client
//! let html = session.rendered().to_html();
//!
//! // Later: a client event
//! let outcome = session.handle_event("addTodo", &payload)?;
//! if outcome.shared_change {
//!     hub.publish(session.id());
//! }
//! ```
//!
//! [`LiveComponent`]: liveview_core::component::LiveComponent

pub mod hub;
pub mod metrics;
pub mod session;

pub use error::RuntimeError;
pub use hub::{HubMessage, LiveHub, SessionRegistration, Subscription};
pub use session::{EventOutcome, LiveSession};

/// Error types for the live runtime
pub mod error {
    use liveview_core::DecodeError;
    use thiserror::Error;

    /// Errors that can occur while driving a live session
    ///
    /// None of these are fatal: the session keeps its previous state and the
    /// host decides whether to report the error to the client.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum RuntimeError {
        /// A client event could not be decoded
        #[error("Invalid event: {0}")]
        Decode(#[from] DecodeError),

        /// The hub's notification channel closed
        ///
        /// Happens only when every hub handle has been dropped, typically
        /// during shutdown.
        #[error("Hub notification channel closed")]
        ChannelClosed,
    }
}

/// Health check status levels
///
/// Indicates the current health state of a component or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,

    /// Component is operational but under pressure (e.g., many sessions)
    Degraded,

    /// Component cannot take more work (e.g., session hard limit reached)
    Unhealthy,
}

/// Health check result for a component
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    pub message: Option<String>,

    /// Optional metadata (e.g., session counts)
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create a degraded check result
    #[must_use]
    pub fn degraded(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}
