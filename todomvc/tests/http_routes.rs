//! HTTP integration tests for the TodoMVC router
//!
//! Exercises the static render of `/todos` the way a browser sees it before
//! the socket connects.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use todomvc::{Config, TodoChanges, TodoStore, build_router};

fn server(store: Arc<TodoStore>) -> TestServer {
    TestServer::new(build_router(&Config::default(), store, None)).unwrap()
}

#[tokio::test]
async fn root_redirects_to_todos() {
    let server = server(Arc::new(TodoStore::new()));

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/todos");
}

#[tokio::test]
async fn todos_page_renders_the_app_shell() {
    let server = server(Arc::new(TodoStore::new()));

    let response = server.get("/todos").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>TodoMVC · LiveView</title>"));
    assert!(html.contains("todomvc-app-css@2.4.3/index.css"));
    assert!(html.contains(r#"data-live-socket="/todos/live""#));
    assert!(html.contains(r#"<section class="todoapp">"#));
    assert!(html.contains("Double-click to edit a todo"));
    // Nothing to show yet
    assert!(!html.contains("todo-count"));
}

#[tokio::test]
async fn filter_param_applies_to_the_static_render() {
    let store = Arc::new(TodoStore::new());
    store.create(TodoChanges::text("buy milk")).unwrap();
    let walk = store.create(TodoChanges::text("walk dog")).unwrap();
    store.update(walk.id, TodoChanges::completed(true)).unwrap();
    let server = server(store);

    let active = server.get("/todos").add_query_param("filter", "active").await.text();
    assert!(active.contains("buy milk"));
    assert!(!active.contains("walk dog"));
    assert!(active.contains("<strong>1</strong> item left"));
    assert!(active.contains(r#"<a href="/todos?filter=active" data-live-patch="" class="selected">"#));

    let all = server.get("/todos").add_query_param("filter", "bogus").await.text();
    let milk = all.find("buy milk").unwrap();
    let dog = all.find("walk dog").unwrap();
    assert!(dog < milk, "most recent todo renders first");
    assert!(all.contains("<strong>2</strong> items left"));
}

#[tokio::test]
async fn health_and_disabled_metrics() {
    let server = server(Arc::new(TodoStore::new()));

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "ok");

    let ready = server.get("/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    assert_eq!(ready.json::<serde_json::Value>()["status"], "Healthy");

    let metrics = server.get("/metrics").await;
    assert_eq!(metrics.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hard_session_limit_fails_readiness() {
    let mut config = Config::default();
    config.live.max_sessions_hard_limit = Some(0);
    let server = TestServer::new(build_router(&config, Arc::new(TodoStore::new()), None)).unwrap();

    let ready = server.get("/ready").await;

    assert_eq!(ready.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.json::<serde_json::Value>()["status"], "Unhealthy");
}
