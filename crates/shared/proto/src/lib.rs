//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - UserService: user management (create, get, authenticate, update, delete)
//! - TodoService: owner-scoped todo management
//!
//! Every response message carries a `oneof outcome` that holds either the
//! payload or an [`rpc::ServiceError`]. [`Envelope`] exposes that pair as a
//! plain `Result` on both sides of the wire.

/// Shared envelope types.
pub mod rpc {
    tonic::include_proto!("rpc");
}

/// User service definitions.
pub mod user {
    tonic::include_proto!("user");
}

/// Todo service definitions.
pub mod todo {
    tonic::include_proto!("todo");
}

// Re-export commonly used items
pub use rpc::{Ack, ErrorKind, ServiceError};
pub use todo::todo_service_client::TodoServiceClient;
pub use todo::todo_service_server::{TodoService, TodoServiceServer};
pub use user::user_service_client::UserServiceClient;
pub use user::user_service_server::{UserService, UserServiceServer};

/// A response message whose outcome is either a payload or a [`ServiceError`].
pub trait Envelope: Sized {
    type Payload;

    /// Wrap a service result into the wire message.
    fn from_result(result: Result<Self::Payload, ServiceError>) -> Self;

    /// Unwrap the wire message. `None` means the peer sent no outcome at all.
    fn into_result(self) -> Option<Result<Self::Payload, ServiceError>>;
}

macro_rules! envelope {
    ($response:ty, $module:ident, $variant:ident, $payload:ty) => {
        impl Envelope for $response {
            type Payload = $payload;

            fn from_result(result: Result<$payload, ServiceError>) -> Self {
                let outcome = match result {
                    Ok(payload) => $module::Outcome::$variant(payload),
                    Err(error) => $module::Outcome::Error(error),
                };
                Self {
                    outcome: Some(outcome),
                }
            }

            fn into_result(self) -> Option<Result<$payload, ServiceError>> {
                self.outcome.map(|outcome| match outcome {
                    $module::Outcome::$variant(payload) => Ok(payload),
                    $module::Outcome::Error(error) => Err(error),
                })
            }
        }
    };
}

use todo::{
    create_todo_response, delete_todo_response, get_todo_response,
    list_completed_todos_response, list_todos_response, mark_todo_complete_response,
    update_todo_response,
};
use user::{
    authenticate_user_response, create_user_response, delete_user_response, get_user_response,
    update_user_response,
};

envelope!(user::CreateUserResponse, create_user_response, User, user::User);
envelope!(user::GetUserResponse, get_user_response, User, user::User);
envelope!(user::AuthenticateUserResponse, authenticate_user_response, User, user::User);
envelope!(user::UpdateUserResponse, update_user_response, User, user::User);
envelope!(user::DeleteUserResponse, delete_user_response, Deleted, Ack);

envelope!(todo::CreateTodoResponse, create_todo_response, Todo, todo::Todo);
envelope!(todo::GetTodoResponse, get_todo_response, Todo, todo::Todo);
envelope!(todo::ListTodosResponse, list_todos_response, Todos, todo::TodoList);
envelope!(todo::ListCompletedTodosResponse, list_completed_todos_response, Todos, todo::TodoList);
envelope!(todo::UpdateTodoResponse, update_todo_response, Todo, todo::Todo);
envelope!(todo::MarkTodoCompleteResponse, mark_todo_complete_response, Todo, todo::Todo);
envelope!(todo::DeleteTodoResponse, delete_todo_response, Deleted, Ack);
