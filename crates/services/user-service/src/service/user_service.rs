//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::User;

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user. Fails with `DuplicateEmail` if the email is taken.
    async fn create_user(&self, email: String, password: String) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    async fn authenticate_user(&self, email: &str, password: &str) -> AppResult<User>;

    /// Update email and/or password. Empty values leave the field unchanged.
    async fn update_user(&self, id: &str, email: String, password: String) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, email: String, password: String) -> AppResult<User> {
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let user = User::new(Uuid::new_v4().to_string(), email, &password)?;
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn authenticate_user(&self, email: &str, password: &str) -> AppResult<User> {
        match self.repo.find_by_email(email).await? {
            Some(user) if user.check_password(password) => Ok(user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn update_user(&self, id: &str, email: String, password: String) -> AppResult<User> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if !email.is_empty() {
            user.update_email(email);
        }
        if !password.is_empty() {
            user.update_password(&password)?;
        }

        self.repo.update(&user).await?;
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
