//! WebSocket transport for live sessions.
//!
//! Each connection owns one [`LiveSession`]. Client messages drive the
//! session's lifecycle; hub notifications from other sessions trigger a
//! refresh. Both arrive on one task, so the session is never shared.
//!
//! # Architecture
//!
//! ```text
//! Client          Socket Task              LiveHub
//!   │                  │                      │
//!   ├─ join ──────────>│ mount                │
//!   │<─ rendered ──────┤                      │
//!   │                  │                      │
//!   ├─ event ─────────>│ handle_event         │
//!   │<─ diff ──────────┤── publish ──────────>│
//!   │                  │                      │
//!   │                  │<── changed (other) ──┤
//!   │<─ diff ──────────┤ refresh              │
//! ```
//!
//! # Message Protocol
//!
//! **Client → Server:**
//! ```json
//! { "type": "join", "params": { "filter": "active" } }
//! { "type": "event", "event": "addTodo", "payload": { "text": "Buy milk" } }
//! { "type": "patch", "params": { "filter": "completed" } }
//! { "type": "ping" }
//! ```
//!
//! **Server → Client:**
//! ```json
//! { "type": "rendered", "html": "<section class=\"todoapp\">…</section>" }
//! { "type": "diff", "patches": [{ "op": "set_text", "path": [0, 1], "text": "2 items left" }] }
//! { "type": "error", "message": "Unknown event: explode" }
//! { "type": "pong" }
//! ```

use crate::state::LiveState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt, stream::SplitSink};
use liveview_core::{
    Params, Patch, Payload,
    component::{LiveComponent, SessionId},
};
use liveview_runtime::LiveSession;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message sent by the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Mount the session with the page's query params
    Join {
        /// Navigation params
        #[serde(default)]
        params: Params,
    },
    /// A user interaction
    Event {
        /// Event name, e.g. `addTodo`
        event: String,
        /// Form values or `data-live-value-*` attributes
        #[serde(default)]
        payload: Payload,
    },
    /// Live navigation within the page
    Patch {
        /// New navigation params
        #[serde(default)]
        params: Params,
    },
    /// Keep-alive
    Ping,
}

impl ClientMessage {
    /// Message type, used as a metrics label
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Event { .. } => "event",
            Self::Patch { .. } => "patch",
            Self::Ping => "ping",
        }
    }
}

/// Message sent to the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full render after `join`
    Rendered {
        /// Markup for the live root's contents
        html: String,
    },
    /// Changes since the previous render
    Diff {
        /// Patches in application order
        patches: Vec<Patch>,
    },
    /// Rejected message
    Error {
        /// Error description
        message: String,
    },
    /// Keep-alive reply
    Pong,
}

const NOT_JOINED: &str = "Session not joined";

/// Result of handling one client message.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Outcome {
    /// Message to send back, if any
    pub reply: Option<ServerMessage>,
    /// Whether other sessions should be told to refresh
    pub changed: bool,
}

impl Outcome {
    const fn reply(message: ServerMessage) -> Self {
        Self {
            reply: Some(message),
            changed: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::reply(ServerMessage::Error {
            message: message.into(),
        })
    }
}

/// WebSocket upgrade handler for a live component.
///
/// # Example
///
/// ```ignore
/// use liveview_web::handlers::websocket;
/// use axum::{Router, routing::get};
///
/// let app = Router::new()
///     .route("/todos/live", get(websocket::handle::<TodosComponent>))
///     .with_state(state);
/// ```
#[allow(clippy::unused_async)] // Axum handler signature requires async
pub async fn handle<C: LiveComponent>(
    ws: WebSocketUpgrade,
    State(state): State<LiveState<C>>,
) -> Response {
    debug!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection until the client leaves or the hub closes.
async fn handle_socket<C: LiveComponent>(socket: WebSocket, state: LiveState<C>) {
    let registration = state.hub.register();
    let id = registration.id();
    let mut changes = state.hub.subscribe();
    let (mut sender, mut receiver) = socket.split();
    let mut session: Option<LiveSession<C>> = None;

    info!(session_id = %id, "WebSocket connection established");

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Binary(_))) => {
                        warn!(session_id = %id, "Received unexpected binary message");
                        continue;
                    }
                    // Axum answers pings itself
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(session_id = %id, "Client closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(session_id = %id, error = %e, "WebSocket receive failed");
                        break;
                    }
                };

                let outcome = dispatch(&state.component, id, &mut session, &text);
                if outcome.changed {
                    state.hub.publish(id);
                }
                if let Some(reply) = outcome.reply {
                    if send(&mut sender, &reply).await.is_err() {
                        break;
                    }
                }
            }
            change = changes.next_change(id) => {
                if change.is_err() {
                    debug!(session_id = %id, "Hub closed");
                    break;
                }
                // Not joined yet: the eventual mount reads fresh data anyway
                let Some(session) = session.as_mut() else { continue };
                let patches = session.refresh();
                if !patches.is_empty() && send(&mut sender, &ServerMessage::Diff { patches }).await.is_err() {
                    break;
                }
            }
        }
    }

    info!(session_id = %id, "WebSocket connection closed");
}

/// Apply one text frame to the connection's session.
pub(crate) fn dispatch<C: LiveComponent>(
    component: &Arc<C>,
    id: SessionId,
    session: &mut Option<LiveSession<C>>,
    text: &str,
) -> Outcome {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(session_id = %id, error = %e, "Failed to parse WebSocket message");
            return Outcome::error(format!("Malformed message: {e}"));
        }
    };
    metrics::counter!("live_socket_messages_total", "type" => message.kind()).increment(1);

    match message {
        ClientMessage::Ping => Outcome::reply(ServerMessage::Pong),
        ClientMessage::Join { params } => {
            let mounted = LiveSession::mount(Arc::clone(component), id, &params);
            let html = mounted.rendered().to_html();
            *session = Some(mounted);
            Outcome::reply(ServerMessage::Rendered { html })
        }
        ClientMessage::Patch { params } => {
            let Some(session) = session.as_mut() else {
                return Outcome::error(NOT_JOINED);
            };
            Outcome::reply(ServerMessage::Diff {
                patches: session.handle_params(&params),
            })
        }
        ClientMessage::Event { event, payload } => {
            let Some(session) = session.as_mut() else {
                return Outcome::error(NOT_JOINED);
            };
            match session.handle_event(&event, &payload) {
                Ok(outcome) => Outcome {
                    reply: Some(ServerMessage::Diff {
                        patches: outcome.patches,
                    }),
                    changed: outcome.shared_change,
                },
                Err(e) => Outcome::error(e.to_string()),
            }
        }
    }
}

async fn send(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => sender.send(Message::Text(json)).await,
        Err(e) => {
            error!(error = %e, "Failed to serialize server message");
            Ok(())
        }
    }
}
