//! Axum integration for live components.
//!
//! This crate is the imperative shell around a [`LiveComponent`]: it serves
//! the initial HTML page, upgrades the browser's WebSocket, and shuttles
//! events in and patches out through a per-connection
//! [`LiveSession`](liveview_runtime::LiveSession).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP page, WebSocket, /live.js
//! │  - Static render on GET                 │  ← health, metrics, tracing
//! │  - Join / event / patch messages        │
//! ├─────────────────────────────────────────┤
//! │         Live Component                  │
//! │  - mount / handle_params / handle_event │  ← Plain functions over state
//! │  - render → Node                        │  ← Diffed into patches
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **GET** `live_path`: mount with query params, render, wrap in the page shell
//! 2. **Browser** loads `/live.js`, opens the socket and sends `join`
//! 3. **Server** mounts a session, replies `rendered`
//! 4. **Events** are decoded, handled, and answered with `diff`
//! 5. **Other sessions** are told through the hub and send their own `diff`
//!
//! # Example
//!
//! ```ignore
//! use liveview_web::{LiveState, PageConfig, live_router};
//!
//! let state = LiveState::new(TodosComponent::new(store), PageConfig::new("/todos"));
//! let app = live_router(state);
//! axum::serve(listener, app).await?;
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use error::AppError;
pub use page::render_page;
pub use state::{LiveState, PageConfig};

use axum::{Router, routing::get};
use handlers::{health, live, metrics, websocket};
use liveview_core::component::LiveComponent;
use tower_http::trace::TraceLayer;

/// Build the router serving one live component.
///
/// Routes:
/// - `GET {live_path}`: static render inside the page shell
/// - `GET {socket_path}`: WebSocket upgrade
/// - `GET /live.js`: browser client
/// - `GET /health`, `GET /ready`: liveness and readiness
/// - `GET /metrics`: Prometheus text, when a recorder is installed
pub fn live_router<C: LiveComponent>(state: LiveState<C>) -> Router {
    let live_path = state.page.live_path.clone();
    let socket_path = state.page.socket_path.clone();

    Router::new()
        .route(&live_path, get(live::page::<C>))
        .route(&socket_path, get(websocket::handle::<C>))
        .route("/live.js", get(live::client_script))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness::<C>))
        .route("/metrics", get(metrics::render::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
