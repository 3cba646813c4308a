//! Todo Service Library
//!
//! Owner-scoped todo storage over gRPC. Every call carries the caller's
//! user id and never touches another user's rows.

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

use crate::config::TodoServiceConfig;
use crate::grpc::TodoGrpcService;
use crate::infra::Database;
use crate::repository::TodoStore;
use crate::service::TodoManager;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run with environment configuration on an explicit address (combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let mut config = TodoServiceConfig::from_env();
    config.host = host.to_string();
    config.port = port;
    run(config).await
}

pub async fn run_migrations(action: MigrateAction) -> Result<(), BoxError> {
    let config = TodoServiceConfig::from_env();
    Database::connect_without_migrations(&config.database)
        .await?
        .migrate(action)
        .await?;
    Ok(())
}

pub async fn run(config: TodoServiceConfig) -> Result<(), BoxError> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let store = Arc::new(TodoStore::new(db.get_connection()));
    let grpc_service = TodoGrpcService::new(Arc::new(TodoManager::new(store)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(%addr, "Todo service listening");

    Server::builder()
        .add_service(proto::TodoServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
