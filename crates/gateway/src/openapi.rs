//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{AuthResponse, LoginRequest, RegisterRequest};
use crate::handlers::health_handler::HealthResponse;
use crate::handlers::todo_handler::{CompleteTodoRequest, CreateTodoRequest, UpdateTodoRequest};
use crate::handlers::user_handler::UpdateCurrentUserRequest;
use crate::handlers::MessageResponse;
use domain::{TodoResponse, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::todo_handler::create_todo,
        crate::handlers::todo_handler::list_todos,
        crate::handlers::todo_handler::get_todo,
        crate::handlers::todo_handler::update_todo,
        crate::handlers::todo_handler::complete_todo,
        crate::handlers::todo_handler::delete_todo,
        crate::handlers::user_handler::get_current_user,
        crate::handlers::user_handler::update_current_user,
        crate::handlers::user_handler::delete_current_user,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            UpdateCurrentUserRequest,
            TodoResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
            CompleteTodoRequest,
            MessageResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Todos", description = "Owner-scoped todo management"),
        (name = "Users", description = "Current account management"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
