//! User service configuration.

use common::{env_or, env_parse_or, DatabaseConfig};

/// Default SQLite file used when no database URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";

/// Default gRPC port.
pub const DEFAULT_PORT: u16 = 50051;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let url = std::env::var("USER_SERVICE_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut database = DatabaseConfig::with_url(url);
        database.max_connections =
            env_parse_or("USER_SERVICE_DB_MAX_CONNECTIONS", database.max_connections);
        database.min_connections =
            env_parse_or("USER_SERVICE_DB_MIN_CONNECTIONS", database.min_connections);

        Self {
            database,
            host: env_or("USER_SERVICE_HOST", "0.0.0.0"),
            port: env_parse_or("USER_SERVICE_PORT", DEFAULT_PORT),
        }
    }
}
