//! Todo handlers. Every route requires a bearer token and acts on the
//! caller's own todos only.

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppError, AppResult};
use domain::TodoResponse;

use crate::extractors::ValidatedJson;
use crate::handlers::MessageResponse;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Todo creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Buy milk")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: String,
}

/// Todo update request. Omitted or empty fields keep their current value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Completion flag request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteTodoRequest {
    pub completed: bool,
}

/// Todo list filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosQuery {
    /// `true` lists completed todos only, most recently completed first
    pub completed: Option<bool>,
}

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_todo).get(list_todos))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/:id/complete", put(complete_todo))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<TodoResponse>)> {
    let todo = state
        .todo_client
        .create_todo(&current_user.id, payload.title, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// List the caller's todos, newest first
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Todos of the current user", body = Vec<TodoResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_todos(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> AppResult<Json<Vec<TodoResponse>>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let todos = if query.completed.unwrap_or(false) {
        state.todo_client.list_completed_todos(&current_user.id).await?
    } else {
        state.todo_client.list_todos(&current_user.id).await?
    };

    Ok(Json(todos))
}

/// Get one todo
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo", body = TodoResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn get_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state.todo_client.get_todo(&id, &current_user.id).await?;
    Ok(Json(todo))
}

/// Update title and/or description
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn update_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_client
        .update_todo(
            &id,
            &current_user.id,
            payload.title.unwrap_or_default(),
            payload.description.unwrap_or_default(),
        )
        .await?;

    Ok(Json(todo))
}

/// Mark a todo complete or incomplete
#[utoipa::path(
    put,
    path = "/api/todos/{id}/complete",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Todo ID")),
    request_body = CompleteTodoRequest,
    responses(
        (status = 200, description = "Completion state updated", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn complete_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CompleteTodoRequest>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_client
        .mark_todo_complete(&id, &current_user.id, payload.completed)
        .await?;

    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn delete_todo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.todo_client.delete_todo(&id, &current_user.id).await?;
    Ok(Json(MessageResponse::new("todo deleted successfully")))
}
