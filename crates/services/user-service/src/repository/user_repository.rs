//! User repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken email fails with `DuplicateEmail`.
    async fn create(&self, user: &User) -> AppResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Persist email, password hash and `updated_at` of an existing user
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Delete user by ID
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index on email is the last line of defence against concurrent sign-ups.
fn map_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail,
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        UserEntity::insert(ActiveModel::from(user))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_write_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Email, Expr::value(user.email()))
            .col_expr(user::Column::PasswordHash, Expr::value(user.password_hash()))
            .col_expr(user::Column::UpdatedAt, Expr::value(user.updated_at()))
            .filter(user::Column::Id.eq(user.id()))
            .exec(&self.db)
            .await
            .map_err(map_write_err)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = UserEntity::delete_many()
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
