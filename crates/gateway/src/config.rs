//! Gateway configuration.

use std::env;

use common::{env_or, env_parse_or, GrpcClientConfig, JwtConfig};
use domain::{JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};
use thiserror::Error;

/// Configuration errors that abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable is not set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {} bytes long", MIN_JWT_SECRET_LENGTH)]
    WeakJwtSecret,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// User service gRPC client settings
    pub user_service: GrpcClientConfig,
    /// Todo service gRPC client settings
    pub todo_service: GrpcClientConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?;

        Ok(Self {
            user_service: GrpcClientConfig::from_env(env_or(
                "USER_SERVICE_URL",
                "http://localhost:50051",
            )),
            todo_service: GrpcClientConfig::from_env(env_or(
                "TODO_SERVICE_URL",
                "http://localhost:50052",
            )),
            jwt: jwt_config(secret)?,
            host: env_or("GATEWAY_HOST", "0.0.0.0"),
            port: env_parse_or("GATEWAY_PORT", 8080),
        })
    }
}

/// Build a token configuration, rejecting secrets that are too short.
pub fn jwt_config(secret: String) -> Result<JwtConfig, ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::WeakJwtSecret);
    }

    Ok(JwtConfig {
        secret,
        expiration_hours: JWT_EXPIRATION_HOURS,
    })
}
