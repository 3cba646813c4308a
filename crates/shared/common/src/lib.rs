//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - Unified error handling for HTTP and the RPC envelope
//! - Configuration structures
//! - Database connection and per-service migrations (feature `database`)

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
#[cfg(feature = "rpc")]
pub mod rpc;

pub use config::*;
#[cfg(feature = "database")]
pub use database::{Database, MigrateAction};
pub use error::{AppError, AppResult, OptionExt};
