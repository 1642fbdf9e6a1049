//! Domain types for TodoMVC.
//!
//! A todo list is a collection of todo items that can be created, edited,
//! toggled, and removed. The list is shown through one of three filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// What needs to be done; never blank
    pub text: String,
    /// Whether the todo is done
    pub completed: bool,
}

/// Partial todo fields for create and update.
///
/// `None` leaves a field at its default (create) or current value (update).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoChanges {
    /// New text
    pub text: Option<String>,
    /// New completion flag
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// Changes setting only the text
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// Changes setting only the completion flag
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Which todos the list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Every filter, in the order the footer links show them
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Parse the `filter` navigation parameter.
    ///
    /// Absent or unrecognized values fall back to [`Filter::All`].
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("active") => Self::Active,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }

    /// Value used in the `filter` parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Link label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Whether `todo` passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Keep the todos passing this filter, preserving order
    #[must_use]
    pub fn apply(self, todos: Vec<Todo>) -> Vec<Todo> {
        match self {
            Self::All => todos,
            _ => todos.into_iter().filter(|todo| self.matches(todo)).collect(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    fn todo(text: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn todo_id_round_trips_through_display() {
        let id = TodoId::new();
        let parsed: TodoId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<TodoId>().is_err());
    }

    #[test]
    fn filter_from_param_falls_back_to_all() {
        assert_eq!(Filter::from_param(None), Filter::All);
        assert_eq!(Filter::from_param(Some("all")), Filter::All);
        assert_eq!(Filter::from_param(Some("active")), Filter::Active);
        assert_eq!(Filter::from_param(Some("completed")), Filter::Completed);
        assert_eq!(Filter::from_param(Some("bogus")), Filter::All);
        assert_eq!(Filter::from_param(Some("Active")), Filter::All);
    }

    #[test]
    fn filter_apply_preserves_order() {
        let todos = vec![todo("c", true), todo("b", false), todo("a", true)];

        let completed = Filter::Completed.apply(todos.clone());
        assert_eq!(
            completed.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
            ["c", "a"]
        );
        assert_eq!(Filter::Active.apply(todos.clone()).len(), 1);
        assert_eq!(Filter::All.apply(todos.clone()), todos);
    }

    #[test]
    fn filter_param_values_round_trip() {
        for filter in Filter::ALL {
            assert_eq!(Filter::from_param(Some(filter.as_str())), filter);
        }
    }
}
