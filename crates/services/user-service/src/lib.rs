//! User Service Library
//!
//! Accounts and credential checks over gRPC. Runs standalone or inside the
//! combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

pub use common::MigrateAction;

use crate::config::UserServiceConfig;
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Boxed error returned by the entry points.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run with environment configuration on an explicit address (combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let mut config = UserServiceConfig::from_env();
    config.host = host.to_string();
    config.port = port;
    run(config).await
}

/// Apply a migration command to the configured database.
pub async fn run_migrations(action: MigrateAction) -> Result<(), BoxError> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;
    db.migrate(action).await?;
    Ok(())
}

/// Migrate the database, then serve gRPC on `config.host:config.port`.
pub async fn run(config: UserServiceConfig) -> Result<(), BoxError> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let users = Arc::new(UserManager::new(Arc::new(UserStore::new(db.get_connection()))));
    let grpc_service = UserGrpcService::new(users);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("User service listening on {}", addr);

    Server::builder()
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
