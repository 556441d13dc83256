//! Domain types for the todo service.
//!
//! `TodoItem` is what the store owns and what the HTTP layer returns.
//! `CreateTodo` and `UpdateTodo` are the request payloads; they live here
//! rather than in the server crate because `Store::update` consumes
//! `UpdateTodo` directly.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Always `>= 1`.
pub type TodoId = u64;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; a `null` value counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// True when the payload would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Merge the present fields into `todo`.
    pub(crate) fn apply_to(&self, todo: &mut TodoItem) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}
