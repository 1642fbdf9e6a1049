//! Per-connection live session.
//!
//! A `LiveSession` owns the view state of one connected client plus the tree
//! it last rendered. Every lifecycle call re-renders and returns the patches
//! between the previous and the new tree; the caller ships them to the client.
//!
//! Sessions are not shared: the transport task that owns the connection owns
//! the session, so lifecycle calls are serialised per connection without
//! locking. Shared domain data lives behind the component.

use crate::error::RuntimeError;
use liveview_core::{
    Node, Params, Patch, Payload, diff,
    component::{LiveComponent, Session, SessionId},
    event::LiveEvent,
};
use std::sync::Arc;
use std::time::Instant;

/// Result of a handled client event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// Changes to ship to this session's client
    pub patches: Vec<Patch>,
    /// Shared data was written; other sessions should refresh
    pub shared_change: bool,
}

/// One connected client's view state.
pub struct LiveSession<C: LiveComponent> {
    id: SessionId,
    component: Arc<C>,
    state: C::State,
    rendered: Node,
}

impl<C: LiveComponent> LiveSession<C> {
    /// Mount the component for a new connection, apply its params, then render once.
    #[tracing::instrument(skip(component, params), name = "live_mount", fields(session_id = %id))]
    pub fn mount(component: Arc<C>, id: SessionId, params: &Params) -> Self {
        let mut state = component.mount(params, &Session::new(id));
        component.handle_params(&mut state, params);
        let rendered = component.render(&state);
        metrics::counter!("live_sessions_mounted_total").increment(1);
        tracing::debug!("Session mounted");

        Self {
            id,
            component,
            state,
            rendered,
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Current view state
    #[must_use]
    pub const fn state(&self) -> &C::State {
        &self.state
    }

    /// The tree most recently rendered (what the client is showing)
    #[must_use]
    pub const fn rendered(&self) -> &Node {
        &self.rendered
    }

    /// Apply new navigation parameters.
    #[tracing::instrument(skip(self, params), name = "live_params", fields(session_id = %self.id))]
    pub fn handle_params(&mut self, params: &Params) -> Vec<Patch> {
        self.component.handle_params(&mut self.state, params);
        self.rerender()
    }

    /// Decode and handle a client event.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Decode`] if the event name or payload is not
    /// understood. State is left untouched in that case.
    #[tracing::instrument(skip(self, payload), name = "live_event", fields(session_id = %self.id))]
    pub fn handle_event(&mut self, name: &str, payload: &Payload) -> Result<EventOutcome, RuntimeError> {
        let event = match C::Event::decode(name, payload) {
            Ok(event) => event,
            Err(e) => {
                metrics::counter!("live_events_rejected_total").increment(1);
                tracing::warn!(error = %e, "Rejected client event");
                return Err(e.into());
            }
        };

        metrics::counter!("live_events_total", "event" => event.name()).increment(1);
        tracing::debug!(?event, "Handling event");
        let shared_change = self.component.handle_event(&mut self.state, event);
        Ok(EventOutcome {
            patches: self.rerender(),
            shared_change,
        })
    }

    /// Recompute state after another session changed shared data.
    #[tracing::instrument(skip(self), name = "live_refresh", fields(session_id = %self.id))]
    pub fn refresh(&mut self) -> Vec<Patch> {
        self.component.handle_refresh(&mut self.state);
        self.rerender()
    }

    fn rerender(&mut self) -> Vec<Patch> {
        let start = Instant::now();
        let next = self.component.render(&self.state);
        let patches = diff(&self.rendered, &next);
        self.rendered = next;

        metrics::histogram!("live_render_duration_seconds").record(start.elapsed().as_secs_f64());
        // Precision loss acceptable for metrics (patch counts < 2^52)
        #[allow(clippy::cast_precision_loss)]
        metrics::histogram!("live_diff_patches").record(patches.len() as f64);
        tracing::trace!(patches = patches.len(), "Re-rendered");

        patches
    }
}
