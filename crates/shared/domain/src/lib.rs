//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities are mutated only through their methods; storage adapters rebuild
//! them with `restore`.

mod clock;
pub mod constants;
pub mod error;
pub mod password;
pub mod todo;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use todo::{Todo, TodoResponse};
pub use user::{User, UserResponse};
