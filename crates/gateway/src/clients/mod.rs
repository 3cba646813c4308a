//! gRPC clients for calling the backend services.
//!
//! Handlers depend on the [`UserServiceClient`] and [`TodoServiceClient`]
//! traits; [`UserClient`] and [`TodoClient`] are the tonic implementations.

mod todo_client;
mod user_client;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{TodoResponse, UserResponse};

pub use todo_client::TodoClient;
pub use user_client::UserClient;

/// Calls into user-service.
#[async_trait]
pub trait UserServiceClient: Send + Sync {
    async fn create_user(&self, email: String, password: String) -> AppResult<UserResponse>;

    async fn authenticate_user(&self, email: String, password: String)
        -> AppResult<UserResponse>;

    async fn get_user(&self, id: &str) -> AppResult<UserResponse>;

    /// Empty `email`/`password` leave the field unchanged.
    async fn update_user(&self, id: &str, email: String, password: String)
        -> AppResult<UserResponse>;

    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Calls into todo-service. Every call is scoped to `user_id`.
#[async_trait]
pub trait TodoServiceClient: Send + Sync {
    async fn create_todo(
        &self,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse>;

    async fn get_todo(&self, id: &str, user_id: &str) -> AppResult<TodoResponse>;

    async fn list_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>>;

    async fn list_completed_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>>;

    async fn update_todo(
        &self,
        id: &str,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse>;

    async fn mark_todo_complete(
        &self,
        id: &str,
        user_id: &str,
        completed: bool,
    ) -> AppResult<TodoResponse>;

    async fn delete_todo(&self, id: &str, user_id: &str) -> AppResult<()>;
}

/// Open a channel with connect and per-request timeouts.
async fn connect_channel(config: &GrpcClientConfig) -> Result<Channel, tonic::transport::Error> {
    debug!("Connecting to {}", config.endpoint);
    Endpoint::from_shared(config.endpoint.clone())?
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .connect()
        .await
}

/// Parse an RFC 3339 timestamp received from a backend service.
fn parse_timestamp(value: &str, field: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Invalid {field} from backend: {value:?}")))
}
