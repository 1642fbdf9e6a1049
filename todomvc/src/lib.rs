//! TodoMVC as a live component.
//!
//! The todo list is rendered on the server and kept in sync with the browser
//! over a WebSocket. It demonstrates:
//!
//! - An injectable in-memory store shared by every session
//! - A closed event enum decoded from wire names
//! - A render tree built functionally from state and diffed into patches
//! - Cross-session updates through the live hub
//! - Testing with `ComponentTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todomvc::{Config, TodoStore, build_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let app = build_router(&config, Arc::new(TodoStore::new()), None);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod event;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use component::{EditError, TodosComponent, TodosState};
pub use config::Config;
pub use event::TodoEvent;
pub use store::{StoreError, TodoStore, ValidationError};
pub use types::{Filter, Todo, TodoChanges, TodoId};

use axum::{Router, response::Redirect, routing::get};
use liveview_runtime::{LiveHub, metrics::PrometheusMetrics};
use liveview_web::{LiveState, PageConfig, live_router};
use std::sync::Arc;

/// Path the todo list is served at
pub const TODOS_PATH: &str = "/todos";

/// TodoMVC stylesheets, linked in order
const STYLESHEETS: [&str; 2] = [
    "https://unpkg.com/todomvc-common@1.0.5/base.css",
    "https://unpkg.com/todomvc-app-css@2.4.3/index.css",
];

/// Build the application router.
///
/// Serves the todo list at [`TODOS_PATH`] and redirects `/` there. Every
/// session shares `store`. Pass an installed recorder to expose `/metrics`.
pub fn build_router(
    config: &Config,
    store: Arc<TodoStore>,
    metrics: Option<PrometheusMetrics>,
) -> Router {
    let page = STYLESHEETS
        .into_iter()
        .fold(PageConfig::new(TODOS_PATH), |page, href| page.with_stylesheet(href))
        .with_title(config.page.title.as_str(), config.page.title_suffix.as_str())
        .with_footer(view::info_footer());
    let mut hub = LiveHub::default().with_soft_limit(config.live.max_sessions_soft_limit);
    if let Some(hard_limit) = config.live.max_sessions_hard_limit {
        hub = hub.with_hard_limit(hard_limit);
    }

    let mut state = LiveState::new(TodosComponent::new(store), page).with_hub(hub);
    if let Some(metrics) = metrics {
        state = state.with_metrics(metrics);
    }

    Router::new()
        .route("/", get(|| async { Redirect::to(TODOS_PATH) }))
        .merge(live_router(state))
}
