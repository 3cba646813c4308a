//! Todo repository implementation.
//!
//! Every query is scoped by owner: rows are filtered on both `id` and
//! `user_id`, so a foreign todo is indistinguishable from a missing one.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::todo::{self, ActiveModel, Entity as TodoEntity};
use common::{AppError, AppResult};
use domain::Todo;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Todo repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo
    async fn create(&self, todo: &Todo) -> AppResult<()>;

    /// Find a todo by ID, only if owned by `user_id`
    async fn find_by_id(&self, id: &str, user_id: &str) -> AppResult<Option<Todo>>;

    /// All todos of a user, newest first
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Todo>>;

    /// Completed todos of a user, most recently completed first
    async fn list_completed_by_user(&self, user_id: &str) -> AppResult<Vec<Todo>>;

    /// Persist every mutable field of an existing todo
    async fn update(&self, todo: &Todo) -> AppResult<()>;

    /// Delete a todo owned by `user_id`
    async fn delete(&self, id: &str, user_id: &str) -> AppResult<()>;
}

/// SeaORM-backed implementation of TodoRepository
pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn create(&self, todo: &Todo) -> AppResult<()> {
        TodoEntity::insert(ActiveModel::from(todo))
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> AppResult<Option<Todo>> {
        let result = TodoEntity::find()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Todo::from))
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .order_by_desc(todo::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn list_completed_by_user(&self, user_id: &str) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .filter(todo::Column::Completed.eq(true))
            .order_by_desc(todo::Column::CompletedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn update(&self, todo: &Todo) -> AppResult<()> {
        let result = TodoEntity::update_many()
            .col_expr(todo::Column::Title, Expr::value(todo.title()))
            .col_expr(todo::Column::Description, Expr::value(todo.description()))
            .col_expr(todo::Column::Completed, Expr::value(todo.is_completed()))
            .col_expr(todo::Column::UpdatedAt, Expr::value(todo.updated_at()))
            .col_expr(todo::Column::CompletedAt, Expr::value(todo.completed_at()))
            .filter(todo::Column::Id.eq(todo.id()))
            .filter(todo::Column::UserId.eq(todo.user_id()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &str, user_id: &str) -> AppResult<()> {
        let result = TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
