//! Repository layer for data access.

pub mod entities;
mod todo_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoRepository, TodoStore};
