//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::DomainResult;
use crate::password::Password;

/// User domain entity.
///
/// Fields are private: state changes go through the mutation methods so
/// that `updated_at` always moves with the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    email: String,
    password: Password,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, hashing `password` with a fresh salt.
    pub fn new(id: String, email: String, password: &str) -> DomainResult<Self> {
        let password = Password::hash(password)?;
        let now = clock::now();
        Ok(Self {
            id,
            email,
            password,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user from persisted state. No hashing is performed.
    pub fn restore(
        id: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password: Password::from_hash(password_hash),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        self.password.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check a candidate password. Empty candidates never match.
    pub fn check_password(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.password.verify(candidate)
    }

    /// Replace the password hash.
    ///
    /// An empty `new_password` leaves the user untouched.
    pub fn update_password(&mut self, new_password: &str) -> DomainResult<()> {
        if new_password.is_empty() {
            return Ok(());
        }
        self.password = Password::hash(new_password)?;
        self.updated_at = clock::now();
        Ok(())
    }

    /// Overwrite the email address. Format is not checked here.
    pub fn update_email(&mut self, new_email: String) {
        self.email = new_email;
        self.updated_at = clock::now();
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    /// User email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
