//! Client events for the todo list.
//!
//! Wire names and payload fields are fixed by the markup in [`crate::view`];
//! both sides use the constants in [`names`].

use crate::types::TodoId;
use liveview_core::{DecodeError, LiveEvent, Payload};

/// Event names as they appear on the wire
pub mod names {
    /// Submit of the new-todo form
    pub const ADD_TODO: &str = "addTodo";
    /// Change of a row's checkbox
    pub const TOGGLE_TODO: &str = "toggleTodo";
    /// Submit of a row's edit form
    pub const EDIT_TODO: &str = "editTodo";
    /// Click on a row's destroy button
    pub const REMOVE_TODO: &str = "removeTodo";
    /// Change of the toggle-all checkbox
    pub const COMPLETE_ALL: &str = "completeAll";
    /// Click on "Clear completed"
    pub const CLEAR_COMPLETED_TODOS: &str = "clearCompletedTodos";
}

/// Everything a user can do to the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoEvent {
    /// Create a todo
    AddTodo {
        /// Raw input; validated by the store
        text: String,
    },
    /// Flip a todo's completion flag
    ToggleTodo {
        /// Target todo
        id: TodoId,
    },
    /// Replace a todo's text
    EditTodo {
        /// Target todo
        id: TodoId,
        /// Raw input; validated by the store
        text: String,
    },
    /// Delete a todo
    RemoveTodo {
        /// Target todo
        id: TodoId,
    },
    /// Mark every todo completed
    CompleteAll,
    /// Delete every completed todo
    ClearCompletedTodos,
}

impl LiveEvent for TodoEvent {
    fn decode(name: &str, payload: &Payload) -> Result<Self, DecodeError> {
        match name {
            names::ADD_TODO => Ok(Self::AddTodo {
                text: DecodeError::require(name, payload, "text")?.to_string(),
            }),
            names::TOGGLE_TODO => Ok(Self::ToggleTodo {
                id: todo_id(name, payload)?,
            }),
            names::EDIT_TODO => Ok(Self::EditTodo {
                id: todo_id(name, payload)?,
                text: DecodeError::require(name, payload, "text")?.to_string(),
            }),
            names::REMOVE_TODO => Ok(Self::RemoveTodo {
                id: todo_id(name, payload)?,
            }),
            names::COMPLETE_ALL => Ok(Self::CompleteAll),
            names::CLEAR_COMPLETED_TODOS => Ok(Self::ClearCompletedTodos),
            other => Err(DecodeError::UnknownEvent(other.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => names::ADD_TODO,
            Self::ToggleTodo { .. } => names::TOGGLE_TODO,
            Self::EditTodo { .. } => names::EDIT_TODO,
            Self::RemoveTodo { .. } => names::REMOVE_TODO,
            Self::CompleteAll => names::COMPLETE_ALL,
            Self::ClearCompletedTodos => names::CLEAR_COMPLETED_TODOS,
        }
    }
}

fn todo_id(event: &str, payload: &Payload) -> Result<TodoId, DecodeError> {
    DecodeError::require(event, payload, "id")?
        .parse()
        .map_err(|_| DecodeError::invalid(event, "id", "not a valid todo id"))
}
