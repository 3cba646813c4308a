//! Domain-level errors.
//!
//! These errors represent failures inside entity behavior. They are
//! independent of infrastructure concerns (HTTP, gRPC, database).

use thiserror::Error;

/// Domain-specific errors raised by entity methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl DomainError {
    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        DomainError::Hashing(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
