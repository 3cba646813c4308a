//! Application state for dependency injection.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::clients::{TodoServiceClient, UserServiceClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_client: Arc<dyn UserServiceClient>,
    pub todo_client: Arc<dyn TodoServiceClient>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_client: Arc<dyn UserServiceClient>,
        todo_client: Arc<dyn TodoServiceClient>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            user_client,
            todo_client,
            tokens,
        }
    }
}
