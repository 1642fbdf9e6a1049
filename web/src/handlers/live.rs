//! Static render and client script.
//!
//! The first GET renders the component without a session so the page is
//! usable before the socket connects; the socket's `join` mounts the real
//! session with the same params.

use crate::{page::render_page, state::LiveState};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use liveview_core::{
    Params,
    component::{LiveComponent, Session, SessionId},
};
use std::collections::HashMap;

/// Browser client, served from `/live.js`
pub const CLIENT_SCRIPT: &str = include_str!("../../assets/live.js");

/// Session id used for static renders; real sessions start at 1.
const STATIC_SESSION: SessionId = SessionId::new(0);

/// Render the component inside the page shell.
///
/// # Endpoint
///
/// ```text
/// GET {live_path}?filter=active
/// ```
#[allow(clippy::unused_async)] // Axum handler signature requires async
pub async fn page<C: LiveComponent>(
    State(state): State<LiveState<C>>,
    Query(query): Query<HashMap<String, String>>,
) -> Html<String> {
    let params = Params::from(query);
    let mut view = state.component.mount(&params, &Session::new(STATIC_SESSION));
    state.component.handle_params(&mut view, &params);
    let tree = state.component.render(&view);
    tracing::debug!(path = %state.page.live_path, "Static render");

    Html(render_page(&state.page, &tree))
}

/// Serve the browser client.
#[allow(clippy::unused_async)]
pub async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}
