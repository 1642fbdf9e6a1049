//! HTTP integration tests for the live router
//!
//! Serves a small component through `live_router` and checks the page shell,
//! client script, health and metrics routes.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::StatusCode;
use axum_test::TestServer;
use liveview_core::{
    DecodeError, Element, LiveEvent, Node, Params, Payload,
    component::{LiveComponent, Session},
};
use liveview_runtime::LiveHub;
use liveview_web::{LiveState, PageConfig, live_router};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug)]
enum NoEvent {}

impl LiveEvent for NoEvent {
    fn decode(name: &str, _payload: &Payload) -> Result<Self, DecodeError> {
        Err(DecodeError::UnknownEvent(name.to_string()))
    }

    fn name(&self) -> &'static str {
        match *self {}
    }
}

struct Greeting;

impl LiveComponent for Greeting {
    type State = String;
    type Event = NoEvent;

    fn mount(&self, params: &Params, _session: &Session) -> String {
        params.get("name").unwrap_or("world").to_string()
    }

    fn handle_params(&self, state: &mut String, params: &Params) {
        *state = params.get("name").unwrap_or("world").to_string();
    }

    fn handle_event(&self, _state: &mut String, event: NoEvent) -> bool {
        match event {}
    }

    fn render(&self, state: &String) -> Node {
        Element::new("h1").text(format!("Hello, {state}!")).into()
    }
}

fn server(hub: LiveHub) -> TestServer {
    let page = PageConfig::new("/hello").with_title("Greeting", " · Test");
    let state = LiveState::new(Greeting, page).with_hub(hub);
    TestServer::new(live_router(state)).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn page_renders_statically_with_query_params() {
    let server = server(LiveHub::default());

    let response = server.get("/hello").add_query_param("name", "<ada>").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<title>Greeting · Test</title>"));
    assert!(html.contains(r#"data-live-socket="/hello/live""#));
    assert!(html.contains("<h1>Hello, &lt;ada&gt;!</h1>"));
}

#[tokio::test]
async fn client_script_is_served() {
    let server = server(LiveHub::default());

    let response = server.get("/live.js").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("data-live-root"));
    assert_eq!(
        response.header("content-type"),
        "application/javascript; charset=utf-8"
    );
}

#[tokio::test]
async fn health_and_readiness() {
    let hub = LiveHub::new(4).with_soft_limit(0);
    let _connected = hub.register();
    let server = server(hub);

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "ok");

    let ready = server.get("/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    let body: serde_json::Value = ready.json();
    assert_eq!(body["component"], "live_hub");
    assert_eq!(body["status"], "Degraded");
}

#[tokio::test]
async fn readiness_fails_at_hard_limit() {
    let hub = LiveHub::new(4).with_hard_limit(1);
    let connected = hub.register();
    let server = server(hub);

    let ready = server.get("/ready").await;
    assert_eq!(ready.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = ready.json();
    assert_eq!(body["status"], "Unhealthy");

    drop(connected);
    assert_eq!(server.get("/ready").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_without_recorder_is_not_found() {
    let server = server(LiveHub::default());

    let response = server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}
