//! In-memory store and domain types for the todo service.
//!
//! # Overview
//! `Store` owns every `TodoItem` and the id sequence. It exposes plain,
//! synchronous `list`/`get`/`create`/`update`/`delete` operations that any
//! HTTP layer can call directly; the `todo-server` crate is one such layer.
//!
//! # Design
//! - One `Mutex` guards both the map and the counter, so each operation is
//!   atomic with respect to all others.
//! - "Not found" is an ordinary `Option`/`bool` outcome; the store has no
//!   error type because nothing in it can fail.
//! - Ids start at 1 and are never reused, even after a delete.

pub mod store;
pub mod types;

pub use store::Store;
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
