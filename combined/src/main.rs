//! Combined binary for development - runs all services in one process.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::BoxError;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "todo-app")]
#[command(about = "Todo app services in a single process (development)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "GATEWAY_PORT", default_value = "8080")]
        gateway_port: u16,
        #[arg(long, env = "USER_SERVICE_PORT", default_value = "50051")]
        user_port: u16,
        #[arg(long, env = "TODO_SERVICE_PORT", default_value = "50052")]
        todo_port: u16,
    },
    /// Run database migrations for both services
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            user_port,
            todo_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:      http://{}:{}", host, gateway_port);
            info!("  User service: http://{}:{}", host, user_port);
            info!("  Todo service: http://{}:{}", host, todo_port);

            let user_host = host.clone();
            let user_handle = tokio::spawn(async move {
                if let Err(e) = user_service_lib::run_embedded(&user_host, user_port).await {
                    error!("User service failed: {}", e);
                }
            });

            let todo_host = host.clone();
            let todo_handle = tokio::spawn(async move {
                if let Err(e) = todo_service_lib::run_embedded(&todo_host, todo_port).await {
                    error!("Todo service failed: {}", e);
                }
            });

            // Gateway connects eagerly, give the gRPC servers time to bind
            tokio::time::sleep(Duration::from_millis(500)).await;

            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) =
                    gateway_lib::run_embedded(&gateway_host, gateway_port, user_port, todo_port)
                        .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = user_handle => {
                    error!("User service exited unexpectedly");
                }
                _ = todo_handle => {
                    error!("Todo service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(action).await?;
            todo_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
