//! In-memory todo repository.
//!
//! One `TodoStore` is shared by every connected session. All operations take
//! a single lock, so each one is atomic with respect to the others and a
//! reader never sees a half-applied update.
//!
//! Presentation order is reverse insertion: every todo gets a monotonically
//! increasing sequence number at creation, and `list` walks them backwards.

use crate::types::{Todo, TodoChanges, TodoId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// A field failed validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{field} {reason}")]
pub struct ValidationError {
    /// Offending field
    pub field: &'static str,
    /// What is wrong with it
    pub reason: &'static str,
}

impl ValidationError {
    const BLANK_TEXT: Self = Self {
        field: "text",
        reason: "can't be blank",
    };
}

/// Errors from store writes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The changes would produce an invalid todo
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No todo with this id
    #[error("Todo {0} not found")]
    NotFound(TodoId),
}

#[derive(Debug, Default)]
struct Inner {
    /// Todos keyed by creation sequence
    by_seq: BTreeMap<u64, Todo>,
    /// Sequence number of each live todo
    index: HashMap<TodoId, u64>,
    next_seq: u64,
}

/// Shared in-memory todo repository.
///
/// # Example
///
/// ```
/// use todomvc::{TodoChanges, TodoStore};
///
/// let store = TodoStore::new();
/// let milk = store.create(TodoChanges::text("buy milk")).unwrap();
/// let dog = store.create(TodoChanges::text("walk dog")).unwrap();
///
/// let texts: Vec<_> = store.list().into_iter().map(|t| t.text).collect();
/// assert_eq!(texts, ["walk dog", "buy milk"]);
///
/// store.update(dog.id, TodoChanges::completed(true)).unwrap();
/// assert_eq!(store.active_count(), 1);
/// # let _ = milk;
/// ```
#[derive(Debug, Default)]
pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl TodoStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave `Inner` half-written:
    // every write validates first and mutates last.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All todos, most recently created first
    #[must_use]
    pub fn list(&self) -> Vec<Todo> {
        self.read().by_seq.values().rev().cloned().collect()
    }

    /// Looks up a todo
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<Todo> {
        let inner = self.read();
        inner
            .index
            .get(&id)
            .and_then(|seq| inner.by_seq.get(seq))
            .cloned()
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().index.len()
    }

    /// Whether the store holds no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().index.is_empty()
    }

    /// Number of todos not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.read().by_seq.values().filter(|t| !t.completed).count()
    }

    /// Validates and inserts a new todo with a fresh id.
    ///
    /// `completed` defaults to `false`. Text is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the text is missing or blank; the store
    /// is unchanged in that case.
    pub fn create(&self, changes: TodoChanges) -> Result<Todo, ValidationError> {
        let text = validate_text(changes.text.as_deref().unwrap_or_default())?;
        let todo = Todo {
            id: TodoId::new(),
            text,
            completed: changes.completed.unwrap_or(false),
        };

        let mut inner = self.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.index.insert(todo.id, seq);
        inner.by_seq.insert(seq, todo.clone());
        drop(inner);

        tracing::debug!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// Merges `changes` onto an existing todo and replaces it.
    ///
    /// The todo keeps its id and its position in the list.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `id` is not in the store
    /// - [`StoreError::Validation`] if the merged text is blank
    pub fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Todo, StoreError> {
        let text = changes.text.as_deref().map(validate_text).transpose()?;

        let mut inner = self.write();
        let seq = *inner.index.get(&id).ok_or(StoreError::NotFound(id))?;
        let slot = inner.by_seq.get_mut(&seq).ok_or(StoreError::NotFound(id))?;

        let updated = Todo {
            id,
            text: text.unwrap_or_else(|| slot.text.clone()),
            completed: changes.completed.unwrap_or(slot.completed),
        };
        slot.clone_from(&updated);
        drop(inner);

        tracing::debug!(todo_id = %id, completed = updated.completed, "Todo updated");
        Ok(updated)
    }

    /// Deletes a todo if present; returns whether anything was removed.
    ///
    /// Removing an unknown id is not an error.
    pub fn remove(&self, id: TodoId) -> bool {
        let mut inner = self.write();
        let removed = inner
            .index
            .remove(&id)
            .and_then(|seq| inner.by_seq.remove(&seq))
            .is_some();
        drop(inner);

        if removed {
            tracing::debug!(todo_id = %id, "Todo removed");
        }
        removed
    }
}

fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BLANK_TEXT);
    }
    Ok(trimmed.to_string())
}
