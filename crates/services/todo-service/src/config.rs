//! Todo service configuration.

use common::{env_or, env_parse_or, DatabaseConfig};

/// Default SQLite file used when no database URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db?mode=rwc";

/// Default gRPC port.
pub const DEFAULT_PORT: u16 = 50052;

/// Todo service configuration.
#[derive(Debug, Clone)]
pub struct TodoServiceConfig {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
}

impl TodoServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `TODO_SERVICE_DATABASE_URL` wins over the shared `DATABASE_URL`.
    pub fn from_env() -> Self {
        let url = std::env::var("TODO_SERVICE_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut database = DatabaseConfig::with_url(url);
        database.max_connections =
            env_parse_or("TODO_SERVICE_DB_MAX_CONNECTIONS", database.max_connections);
        database.min_connections =
            env_parse_or("TODO_SERVICE_DB_MIN_CONNECTIONS", database.min_connections);

        Self {
            database,
            host: env_or("TODO_SERVICE_HOST", "0.0.0.0"),
            port: env_parse_or("TODO_SERVICE_PORT", DEFAULT_PORT),
        }
    }
}
