//! Todo service - owner-scoped todo use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::Todo;

use crate::repository::TodoRepository;

/// Todo service trait for dependency injection.
///
/// Every operation takes the caller's `user_id`; a todo owned by someone
/// else behaves exactly like a missing one (`NotFound`).
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn create_todo(&self, user_id: String, title: String, description: String)
        -> AppResult<Todo>;

    async fn get_todo(&self, id: &str, user_id: &str) -> AppResult<Todo>;

    /// All todos, newest first
    async fn list_todos(&self, user_id: &str) -> AppResult<Vec<Todo>>;

    /// Completed todos, most recently completed first
    async fn list_completed_todos(&self, user_id: &str) -> AppResult<Vec<Todo>>;

    /// Empty title/description keep their current value
    async fn update_todo(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        description: &str,
    ) -> AppResult<Todo>;

    async fn mark_todo_complete(&self, id: &str, user_id: &str, completed: bool)
        -> AppResult<Todo>;

    async fn delete_todo(&self, id: &str, user_id: &str) -> AppResult<()>;
}

/// Concrete implementation of TodoService using repository.
pub struct TodoManager {
    repo: Arc<dyn TodoRepository>,
}

impl TodoManager {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TodoService for TodoManager {
    async fn create_todo(
        &self,
        user_id: String,
        title: String,
        description: String,
    ) -> AppResult<Todo> {
        let todo = Todo::new(Uuid::new_v4().to_string(), user_id, title, description);
        self.repo.create(&todo).await?;

        tracing::debug!(todo_id = %todo.id(), user_id = %todo.user_id(), "Todo created");
        Ok(todo)
    }

    async fn get_todo(&self, id: &str, user_id: &str) -> AppResult<Todo> {
        self.repo.find_by_id(id, user_id).await?.ok_or_not_found()
    }

    async fn list_todos(&self, user_id: &str) -> AppResult<Vec<Todo>> {
        self.repo.list_by_user(user_id).await
    }

    async fn list_completed_todos(&self, user_id: &str) -> AppResult<Vec<Todo>> {
        self.repo.list_completed_by_user(user_id).await
    }

    async fn update_todo(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        description: &str,
    ) -> AppResult<Todo> {
        let mut todo = self.get_todo(id, user_id).await?;
        todo.update(title, description);
        self.repo.update(&todo).await?;
        Ok(todo)
    }

    async fn mark_todo_complete(
        &self,
        id: &str,
        user_id: &str,
        completed: bool,
    ) -> AppResult<Todo> {
        let mut todo = self.get_todo(id, user_id).await?;
        todo.mark_complete(completed);
        self.repo.update(&todo).await?;
        Ok(todo)
    }

    async fn delete_todo(&self, id: &str, user_id: &str) -> AppResult<()> {
        self.repo.delete(id, user_id).await
    }
}
