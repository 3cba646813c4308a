//! API Gateway Library
//!
//! HTTP REST API for the todo app. Requests are authenticated with locally
//! verified bearer tokens and forwarded to user-service and todo-service
//! over gRPC.

pub mod auth;
pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::TokenService;
use crate::clients::{TodoClient, UserClient};
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Boxed error returned by the entry points.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run the gateway as an embedded component (for combined binary).
///
/// Backend URLs point at the sibling services on `user_port` and `todo_port`.
pub async fn run_embedded(
    host: &str,
    port: u16,
    user_port: u16,
    todo_port: u16,
) -> Result<(), BoxError> {
    let mut config = GatewayConfig::from_env()?;
    let backend_host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    config.user_service.endpoint = format!("http://{}:{}", backend_host, user_port);
    config.todo_service.endpoint = format!("http://{}:{}", backend_host, todo_port);
    config.host = host.to_string();
    config.port = port;

    run(config).await
}

/// Run the HTTP server with the given configuration.
pub async fn run(config: GatewayConfig) -> Result<(), BoxError> {
    // Create gRPC clients
    let user_client = Arc::new(UserClient::connect(&config.user_service).await?);
    let todo_client = Arc::new(TodoClient::connect(&config.todo_service).await?);
    info!(
        user_service = %config.user_service.endpoint,
        todo_service = %config.todo_service.endpoint,
        "Connected to backend services"
    );

    // Create app state
    let tokens = Arc::new(TokenService::new(&config.jwt));
    let state = AppState::new(user_client, todo_client, tokens);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
