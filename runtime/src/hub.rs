//! Cross-session change notifications.
//!
//! All sessions of a component share its domain data, so a write made through
//! one session must reach the others' next render. The hub is a broadcast
//! channel of "something changed" notices: the writer publishes after an
//! event that wrote shared data, every other session re-renders via
//! [`LiveSession::refresh`](crate::LiveSession::refresh).
//!
//! The hub also hands out session ids and tracks how many sessions are
//! connected, which feeds health and metrics.
//!
//! # Example
//!
//! ```ignore
//! let hub = LiveHub::new(64);
//! let registration = hub.register();
//! let mut changes = hub.subscribe();
//!
//! loop {
//!     changes.next_change(registration.id()).await?;
//!     let patches = session.refresh();
//!     // send patches to the client
//! }
//! ```

use crate::{HealthCheck, error::RuntimeError};
use liveview_core::component::SessionId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::broadcast;

/// Default soft limit on concurrent sessions before health reports degraded.
const DEFAULT_SOFT_LIMIT: usize = 1000;

/// Notification broadcast to every subscribed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubMessage {
    /// Shared data changed as a result of an event in `origin`
    Changed {
        /// Session whose event caused the change
        origin: SessionId,
    },
}

/// Broadcast hub shared by all sessions of one component.
#[derive(Clone, Debug)]
pub struct LiveHub {
    sender: broadcast::Sender<HubMessage>,
    next_id: Arc<AtomicU64>,
    active: Arc<AtomicUsize>,
    soft_limit: usize,
    hard_limit: Option<usize>,
}

impl LiveHub {
    /// Create a hub whose channel buffers `capacity` notifications
    ///
    /// Slow sessions that fall further behind skip ahead; they only need to
    /// know that *something* changed, so lagging is harmless.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
            active: Arc::new(AtomicUsize::new(0)),
            soft_limit: DEFAULT_SOFT_LIMIT,
            hard_limit: None,
        }
    }

    /// Set the session count above which health reports degraded
    #[must_use]
    pub const fn with_soft_limit(mut self, soft_limit: usize) -> Self {
        self.soft_limit = soft_limit;
        self
    }

    /// Set the session count at which health reports unhealthy
    ///
    /// Readiness then fails so a load balancer stops sending new clients.
    /// Existing sessions are not disconnected.
    #[must_use]
    pub const fn with_hard_limit(mut self, hard_limit: usize) -> Self {
        self.hard_limit = Some(hard_limit);
        self
    }

    /// Register a new connection, assigning it a fresh session id
    ///
    /// The session counts as active until the returned registration is dropped.
    #[must_use]
    pub fn register(&self) -> SessionRegistration {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let active = self.active.fetch_add(1, Ordering::AcqRel) + 1;
        // Precision loss acceptable for metrics
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("live_sessions_active").set(active as f64);
        tracing::info!(session_id = %id, active, "Session registered");

        SessionRegistration {
            id,
            active: Arc::clone(&self.active),
        }
    }

    /// Number of currently registered sessions
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Tell every other session that shared data changed
    pub fn publish(&self, origin: SessionId) {
        // Err only means nobody is listening right now
        let receivers = self
            .sender
            .send(HubMessage::Changed { origin })
            .unwrap_or(0);
        tracing::debug!(session_id = %origin, receivers, "Published change");
    }

    /// Subscribe to change notifications
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Report hub health based on the number of connected sessions
    #[must_use]
    pub fn health(&self) -> HealthCheck {
        let active = self.active_sessions();
        let check = match self.hard_limit {
            Some(hard_limit) if active >= hard_limit => HealthCheck::unhealthy(
                "live_hub",
                format!("{active} sessions reached hard limit of {hard_limit}"),
            ),
            _ if active > self.soft_limit => HealthCheck::degraded(
                "live_hub",
                format!("{active} sessions exceed soft limit of {}", self.soft_limit),
            ),
            _ => HealthCheck::healthy("live_hub"),
        };
        check.with_metadata("active_sessions", active.to_string())
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Keeps a session counted as active while alive.
#[derive(Debug)]
pub struct SessionRegistration {
    id: SessionId,
    active: Arc<AtomicUsize>,
}

impl SessionRegistration {
    /// The id assigned to this session
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SessionRegistration {
    fn drop(&mut self) {
        let remaining = self.active.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("live_sessions_active").set(remaining as f64);
        tracing::info!(session_id = %self.id, active = remaining, "Session closed");
    }
}

/// A session's view of the hub's notifications.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<HubMessage>,
}

impl Subscription {
    /// Wait until another session reports a change.
    ///
    /// Notifications originating from `own` are skipped. A lagged receiver
    /// counts as a change, since at least one notification was missed.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ChannelClosed`] once the hub is gone.
    pub async fn next_change(&mut self, own: SessionId) -> Result<(), RuntimeError> {
        loop {
            match self.receiver.recv().await {
                Ok(HubMessage::Changed { origin }) if origin == own => {}
                Ok(HubMessage::Changed { .. }) => return Ok(()),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change subscriber lagged");
                    return Ok(());
                }
                Err(broadcast::error::RecvError::Closed) => return Err(RuntimeError::ChannelClosed),
            }
        }
    }
}
