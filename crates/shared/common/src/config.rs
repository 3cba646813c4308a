//! Shared configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Read an environment variable, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable, falling back to `default` when
/// unset or unparsable.
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Config with default pool sizes for `url`.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Single-connection in-memory SQLite, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://app.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// JWT configuration for authentication.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: domain::constants::JWT_EXPIRATION_HOURS,
        }
    }
}

/// gRPC client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrpcClientConfig {
    /// Service endpoint URL (e.g., "http://localhost:50051")
    pub endpoint: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl GrpcClientConfig {
    /// Client config for `endpoint`, timeouts from `GRPC_CONNECT_TIMEOUT_MS`
    /// and `GRPC_REQUEST_TIMEOUT_MS`.
    pub fn from_env(endpoint: impl Into<String>) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: endpoint.into(),
            connect_timeout_ms: env_parse_or("GRPC_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            request_timeout_ms: env_parse_or("GRPC_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            connect_timeout_ms: 5000,
            request_timeout_ms: 30000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_or_falls_back_on_garbage() {
        std::env::set_var("COMMON_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_parse_or::<u16>("COMMON_TEST_BAD_PORT", 8080), 8080);
        std::env::remove_var("COMMON_TEST_BAD_PORT");
    }

    #[test]
    fn test_env_or_unset() {
        assert_eq!(env_or("COMMON_TEST_DEFINITELY_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_jwt_secret_not_serialized() {
        let config = JwtConfig {
            secret: "super-secret".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert_eq!(config.expiration_hours, 24);
    }
}
