//! The todo component driven through live sessions
//!
//! Checks that the patches a session emits bring the client's copy of the
//! tree up to date, including after another session changed the store.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use liveview_core::{Node, Params, Patch, Payload, apply, component::SessionId};
use liveview_runtime::{LiveHub, LiveSession};
use liveview_testing::query;
use std::sync::Arc;
use std::time::Duration;
use todomvc::{Filter, TodoStore, TodosComponent};

fn session(component: &Arc<TodosComponent>, id: u64, params: &Params) -> (LiveSession<TodosComponent>, Node) {
    let session = LiveSession::mount(Arc::clone(component), SessionId::new(id), params);
    let client = session.rendered().clone();
    (session, client)
}

fn catch_up(client: &mut Node, patches: &[Patch], session: &LiveSession<TodosComponent>) {
    apply(client, patches).unwrap();
    assert_eq!(client, session.rendered());
}

#[test]
fn events_produce_patches_that_match_the_new_render() {
    let component = Arc::new(TodosComponent::new(Arc::new(TodoStore::new())));
    let (mut session, mut client) = session(&component, 1, &Params::new());

    assert!(query::find_by_class(&client, "footer").is_none());

    let added = session
        .handle_event("addTodo", &Payload::new().with("text", "buy milk"))
        .unwrap();
    assert!(added.shared_change);
    assert!(!added.patches.is_empty());
    catch_up(&mut client, &added.patches, &session);

    let id = session.state().visible_todos[0].id.to_string();
    let toggled = session
        .handle_event("toggleTodo", &Payload::new().with("id", id.as_str()))
        .unwrap();
    catch_up(&mut client, &toggled.patches, &session);

    let row = query::find_by_id(&client, &format!("li_{id}")).unwrap();
    assert!(query::has_class(row, "completed"));

    let patches = session.handle_params(&Params::new().with("filter", "active"));
    catch_up(&mut client, &patches, &session);
    assert_eq!(session.state().filter, Filter::Active);
    assert!(query::find_by_id(&client, &format!("li_{id}")).is_none());
}

#[test]
fn rejected_events_leave_the_tree_alone() {
    let component = Arc::new(TodosComponent::new(Arc::new(TodoStore::new())));
    let (mut session, client) = session(&component, 1, &Params::new());

    assert!(session.handle_event("toggleTodo", &Payload::new().with("id", "nope")).is_err());
    assert!(session.handle_event("undo", &Payload::new()).is_err());
    assert_eq!(session.rendered(), &client);
}

#[test]
fn blank_add_renders_an_error_without_creating() {
    let store = Arc::new(TodoStore::new());
    let component = Arc::new(TodosComponent::new(Arc::clone(&store)));
    let (mut session, mut client) = session(&component, 1, &Params::new());

    let rejected = session
        .handle_event("addTodo", &Payload::new().with("text", "  "))
        .unwrap();
    assert!(!rejected.shared_change);
    catch_up(&mut client, &rejected.patches, &session);

    let error = query::find_by_class(&client, "error").unwrap();
    assert_eq!(query::text(error), "text can't be blank");
    assert!(store.is_empty());
}

#[tokio::test]
async fn change_in_one_session_reaches_the_other() {
    let component = Arc::new(TodosComponent::new(Arc::new(TodoStore::new())));
    let hub = LiveHub::default();

    let writer_reg = hub.register();
    let reader_reg = hub.register();
    let mut reader_changes = hub.subscribe();

    let (mut writer, _) = session(&component, writer_reg.id().as_u64(), &Params::new());
    let (mut reader, mut reader_client) = session(
        &component,
        reader_reg.id().as_u64(),
        &Params::new().with("filter", "active"),
    );

    let outcome = writer
        .handle_event("addTodo", &Payload::new().with("text", "walk dog"))
        .unwrap();
    assert!(outcome.shared_change);
    hub.publish(writer.id());

    tokio::time::timeout(Duration::from_secs(1), reader_changes.next_change(reader.id()))
        .await
        .expect("change notification")
        .unwrap();

    let patches = reader.refresh();
    catch_up(&mut reader_client, &patches, &reader);

    let labels: Vec<_> = query::find_all_by_tag(&reader_client, "label")
        .into_iter()
        .map(query::text)
        .collect();
    assert!(labels.contains(&"walk dog".to_string()));
    assert_eq!(reader.state().filter, Filter::Active);
}
