//! Concurrent in-memory todo store.
//!
//! # Design
//! The map and the id counter sit behind one `Mutex`, so every operation is a
//! single critical section and the store is linearizable. Reads take the same
//! lock as writes. The guard is never held across an `.await`; callers on a
//! tokio runtime can call these methods directly from handlers.
//!
//! A poisoned lock is recovered rather than propagated: no statement inside a
//! critical section can leave the map and counter out of step.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::types::{TodoId, TodoItem, UpdateTodo};

#[derive(Debug)]
struct Inner {
    next_id: TodoId,
    todos: HashMap<TodoId, TodoItem>,
}

/// Sole owner of all todo items and the id sequence.
#[derive(Debug)]
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                todos: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every item, in no particular order.
    pub fn list(&self) -> Vec<TodoItem> {
        self.lock().todos.values().cloned().collect()
    }

    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.lock().todos.get(&id).cloned()
    }

    /// Insert a new, uncompleted item under the next id.
    ///
    /// The title is stored as given; rejecting empty titles is up to the
    /// caller.
    pub fn create(&self, title: impl Into<String>) -> TodoItem {
        let mut inner = self.lock();
        let todo = TodoItem {
            id: inner.next_id,
            title: title.into(),
            completed: false,
        };
        inner.todos.insert(todo.id, todo.clone());
        inner.next_id += 1;
        debug!(id = todo.id, "created todo");
        todo
    }

    /// Merge the present fields of `input` into the item with `id`.
    ///
    /// Returns `None` without touching anything when `id` is unknown.
    pub fn update(&self, id: TodoId, input: &UpdateTodo) -> Option<TodoItem> {
        let mut inner = self.lock();
        let todo = inner.todos.get_mut(&id)?;
        input.apply_to(todo);
        debug!(id, "updated todo");
        Some(todo.clone())
    }

    /// Remove the item with `id`. Returns whether it existed.
    pub fn delete(&self, id: TodoId) -> bool {
        let removed = self.lock().todos.remove(&id).is_some();
        if removed {
            debug!(id, "deleted todo");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> TodoId {
        self.lock().next_id
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = Store::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let store = Store::new();
        let ids: Vec<TodoId> = (0..5).map(|i| store.create(format!("todo {i}")).id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.next_id(), 6);
    }

    #[test]
    fn created_todo_is_retrievable_and_incomplete() {
        let store = Store::new();
        let created = store.create("buy milk");
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "buy milk");
        assert!(!fetched.completed);
    }

    #[test]
    fn create_does_not_validate_title() {
        let store = Store::new();
        assert_eq!(store.create("").title, "");
    }

    #[test]
    fn get_missing_returns_none() {
        let store = Store::new();
        assert!(store.get(1).is_none());
    }

    #[test]
    fn update_completed_keeps_title() {
        let store = Store::new();
        let id = store.create("walk dog").id;
        let updated = store
            .update(
                id,
                &UpdateTodo {
                    title: None,
                    completed: Some(true),
                },
            )
            .unwrap();
        assert_eq!(updated.title, "walk dog");
        assert!(updated.completed);
        assert_eq!(store.get(id).unwrap(), updated);
    }

    #[test]
    fn update_title_keeps_completed() {
        let store = Store::new();
        let id = store.create("walk dog").id;
        store.update(
            id,
            &UpdateTodo {
                title: None,
                completed: Some(true),
            },
        );
        let updated = store
            .update(
                id,
                &UpdateTodo {
                    title: Some("walk cat".to_string()),
                    completed: None,
                },
            )
            .unwrap();
        assert_eq!(updated.title, "walk cat");
        assert!(updated.completed);
    }

    #[test]
    fn update_missing_is_a_no_op() {
        let store = Store::new();
        store.create("only");
        let result = store.update(
            42,
            &UpdateTodo {
                title: Some("ghost".to_string()),
                completed: Some(true),
            },
        );
        assert!(result.is_none());
        assert_eq!(store.len(), 1);
        assert!(store.get(42).is_none());
    }

    #[test]
    fn delete_removes_and_second_delete_returns_false() {
        let store = Store::new();
        let id = store.create("temp").id;
        assert!(store.delete(id));
        assert!(store.get(id).is_none());
        assert!(!store.delete(id));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = Store::new();
        let first = store.create("a").id;
        store.delete(first);
        let second = store.create("b").id;
        assert_eq!(second, first + 1);
    }

    #[test]
    fn list_count_tracks_creates_minus_deletes() {
        let store = Store::new();
        for i in 0..4 {
            store.create(format!("todo {i}"));
        }
        store.delete(2);
        store.delete(2);
        store.delete(99);
        assert_eq!(store.list().len(), 3);
        assert!(store.list().iter().all(|t| t.id != 2));
    }

    #[test]
    fn list_is_a_snapshot() {
        let store = Store::new();
        let id = store.create("snap").id;
        let snapshot = store.list();
        store.delete(id);
        assert_eq!(snapshot.len(), 1);
        assert!(store.list().is_empty());
    }
}
