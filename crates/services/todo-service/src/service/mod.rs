//! Service layer - business logic.

mod todo_service;

pub use todo_service::{TodoManager, TodoService};
