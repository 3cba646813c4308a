//! HTTP request handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod auth_handler;
pub mod health_handler;
pub mod todo_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use todo_handler::todo_routes;
pub use user_handler::user_routes;

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "todo deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
