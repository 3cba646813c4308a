//! Todo Service - gRPC server for per-user todo lists.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_service_lib::config::TodoServiceConfig;
use todo_service_lib::{BoxError, MigrateAction};

#[derive(Parser)]
#[command(name = "todo-service")]
#[command(about = "Todo list microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        #[arg(long, env = "TODO_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "TODO_SERVICE_PORT", default_value = "50052")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = TodoServiceConfig::from_env();
            config.host = host;
            config.port = port;
            todo_service_lib::run(config).await
        }
        Commands::Migrate { action } => todo_service_lib::run_migrations(action).await,
    }
}
