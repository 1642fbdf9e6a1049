//! Integration tests for cross-session change broadcasting
//!
//! Two sessions share one component; a change made through one must reach
//! the other through the hub and show up in its next render.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use liveview_core::{
    DecodeError, Element, LiveEvent, Node, Params, Payload, apply,
    component::{LiveComponent, Session},
};
use liveview_runtime::{LiveHub, LiveSession};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Default)]
struct Guestbook {
    names: Mutex<Vec<String>>,
}

#[derive(Debug)]
enum GuestbookEvent {
    Sign { name: String },
}

impl LiveEvent for GuestbookEvent {
    fn decode(name: &str, payload: &Payload) -> Result<Self, DecodeError> {
        match name {
            "sign" => Ok(Self::Sign {
                name: DecodeError::require(name, payload, "name")?.to_string(),
            }),
            other => Err(DecodeError::UnknownEvent(other.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "sign"
    }
}

impl LiveComponent for Guestbook {
    type State = Vec<String>;
    type Event = GuestbookEvent;

    fn mount(&self, _params: &Params, _session: &Session) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    fn handle_params(&self, _state: &mut Vec<String>, _params: &Params) {}

    fn handle_event(&self, state: &mut Vec<String>, event: GuestbookEvent) -> bool {
        match event {
            GuestbookEvent::Sign { name } => {
                let mut names = self.names.lock().unwrap();
                names.push(name);
                state.clone_from(&names);
                true
            }
        }
    }

    fn handle_refresh(&self, state: &mut Vec<String>) {
        state.clone_from(&self.names.lock().unwrap());
    }

    fn render(&self, state: &Vec<String>) -> Node {
        Element::new("ul")
            .children(state.iter().map(|name| Element::new("li").text(name.clone())))
            .into()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn change_in_one_session_reaches_the_other() {
    let component = Arc::new(Guestbook::default());
    let hub = LiveHub::new(16);

    let writer_reg = hub.register();
    let reader_reg = hub.register();
    let mut writer = LiveSession::mount(Arc::clone(&component), writer_reg.id(), &Params::new());
    let mut reader = LiveSession::mount(Arc::clone(&component), reader_reg.id(), &Params::new());
    let mut reader_changes = hub.subscribe();
    let mut reader_client = reader.rendered().clone();

    let outcome = writer
        .handle_event("sign", &Payload::new().with("name", "ada"))
        .expect("valid event");
    assert!(outcome.shared_change);
    hub.publish(writer.id());

    tokio::time::timeout(Duration::from_secs(1), reader_changes.next_change(reader.id()))
        .await
        .expect("notification arrives")
        .expect("hub open");

    let patches = reader.refresh();
    apply(&mut reader_client, &patches).expect("patches apply");

    assert_eq!(reader_client.to_html(), "<ul><li>ada</li></ul>");
    assert_eq!(hub.active_sessions(), 2);
}

#[tokio::test]
async fn many_writers_converge() {
    let component = Arc::new(Guestbook::default());
    let hub = LiveHub::new(64);

    let mut handles = Vec::new();
    for i in 0..8 {
        let component = Arc::clone(&component);
        let hub = hub.clone();
        handles.push(tokio::spawn(async move {
            let registration = hub.register();
            let mut session = LiveSession::mount(component, registration.id(), &Params::new());
            session
                .handle_event("sign", &Payload::new().with("name", format!("guest-{i}")))
                .expect("valid event");
            hub.publish(session.id());
        }));
    }
    for handle in handles {
        handle.await.expect("task completes");
    }

    let registration = hub.register();
    let late = LiveSession::mount(Arc::clone(&component), registration.id(), &Params::new());
    assert_eq!(late.state().len(), 8);
    assert_eq!(hub.active_sessions(), 1);
}
