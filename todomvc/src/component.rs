//! The todo list live component.
//!
//! Per-session state is a projection of the shared [`TodoStore`] through the
//! current [`Filter`]. Every lifecycle hook ends by recomputing that
//! projection, so the state never drifts from the store.

use crate::event::TodoEvent;
use crate::store::{StoreError, TodoStore, ValidationError};
use crate::types::{Filter, Todo, TodoChanges, TodoId};
use crate::view;
use liveview_core::{
    Node, Params,
    component::{LiveComponent, Session},
};
use std::sync::Arc;

/// A failed edit, shown in the row it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditError {
    /// Row being edited
    pub id: TodoId,
    /// Why the edit was rejected
    pub error: ValidationError,
}

/// View state of one connected session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodosState {
    /// Todos passing `filter`, most recent first
    pub visible_todos: Vec<Todo>,
    /// Active filter
    pub filter: Filter,
    /// Rejection of the last add, shown under the new-todo input
    pub add_error: Option<ValidationError>,
    /// Rejection of the last edit
    pub edit_error: Option<EditError>,
}

/// Todo list component backed by an injected store.
#[derive(Debug, Clone)]
pub struct TodosComponent {
    store: Arc<TodoStore>,
}

impl TodosComponent {
    /// Creates a component reading and writing `store`
    #[must_use]
    pub const fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }

    fn reproject(&self, state: &mut TodosState) {
        state.visible_todos = state.filter.apply(self.store.list());
        if state
            .edit_error
            .is_some_and(|edit| self.store.get(edit.id).is_none())
        {
            state.edit_error = None;
        }
    }

    /// Applies `changes` and reports whether the store was written.
    fn update(&self, state: &mut TodosState, id: TodoId, changes: TodoChanges) -> bool {
        match self.store.update(id, changes) {
            Ok(_) => {
                if state.edit_error.is_some_and(|edit| edit.id == id) {
                    state.edit_error = None;
                }
                true
            }
            Err(StoreError::Validation(error)) => {
                tracing::debug!(todo_id = %id, %error, "Edit rejected");
                state.edit_error = Some(EditError { id, error });
                false
            }
            // Removed concurrently or never existed; both are no-ops
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(todo_id = %id, "Todo not found");
                false
            }
        }
    }
}

impl LiveComponent for TodosComponent {
    type State = TodosState;
    type Event = TodoEvent;

    fn mount(&self, _params: &Params, session: &Session) -> TodosState {
        tracing::debug!(session_id = %session.id, "Mounting todos");
        let mut state = TodosState::default();
        self.reproject(&mut state);
        state
    }

    fn handle_params(&self, state: &mut TodosState, params: &Params) {
        state.filter = Filter::from_param(params.get("filter"));
        state.add_error = None;
        self.reproject(state);
    }

    fn handle_event(&self, state: &mut TodosState, event: TodoEvent) -> bool {
        let wrote = match event {
            TodoEvent::AddTodo { text } => match self.store.create(TodoChanges::text(text)) {
                Ok(_) => {
                    state.filter = Filter::All;
                    state.add_error = None;
                    true
                }
                Err(error) => {
                    tracing::debug!(%error, "Add rejected");
                    state.add_error = Some(error);
                    false
                }
            },
            TodoEvent::ToggleTodo { id } => self
                .store
                .get(id)
                .is_some_and(|todo| self.update(state, id, TodoChanges::completed(!todo.completed))),
            TodoEvent::EditTodo { id, text } => {
                self.store.get(id).is_some() && self.update(state, id, TodoChanges::text(text))
            }
            TodoEvent::RemoveTodo { id } => self.store.remove(id),
            TodoEvent::CompleteAll => self
                .store
                .list()
                .into_iter()
                .filter(|t| !t.completed)
                .fold(false, |wrote, todo| {
                    self.update(state, todo.id, TodoChanges::completed(true)) || wrote
                }),
            TodoEvent::ClearCompletedTodos => self
                .store
                .list()
                .into_iter()
                .filter(|t| t.completed)
                .fold(false, |wrote, todo| self.store.remove(todo.id) || wrote),
        };
        self.reproject(state);
        wrote
    }

    fn handle_refresh(&self, state: &mut TodosState) {
        self.reproject(state);
    }

    fn render(&self, state: &TodosState) -> Node {
        view::todo_app(state)
    }
}
