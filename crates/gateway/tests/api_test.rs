//! Integration tests for the HTTP API.
//!
//! The router runs against in-memory fakes of the backend clients, so no
//! gRPC services or databases are needed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult, JwtConfig};
use domain::{Todo, TodoResponse, UserResponse};
use gateway_lib::auth::TokenService;
use gateway_lib::clients::{TodoServiceClient, UserServiceClient};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

// =============================================================================
// Fake backends
// =============================================================================

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Stores users with their plain passwords.
#[derive(Default)]
struct FakeUsers {
    users: Mutex<HashMap<String, (UserResponse, String)>>,
}

#[async_trait]
impl UserServiceClient for FakeUsers {
    async fn create_user(&self, email: String, password: String) -> AppResult<UserResponse> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|(u, _)| u.email == email) {
            return Err(AppError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = UserResponse {
            id: next_id("user"),
            email,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id.clone(), (user.clone(), password));
        Ok(user)
    }

    async fn authenticate_user(&self, email: String, password: String) -> AppResult<UserResponse> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|(u, p)| u.email == email && *p == password)
            .map(|(u, _)| u.clone())
            .ok_or(AppError::InvalidCredentials)
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let users = self.users.lock().unwrap();
        users.get(id).map(|(u, _)| u.clone()).ok_or(AppError::NotFound)
    }

    async fn update_user(&self, id: &str, email: String, password: String) -> AppResult<UserResponse> {
        let mut users = self.users.lock().unwrap();
        if !email.is_empty() && users.iter().any(|(other, (u, _))| other != id && u.email == email) {
            return Err(AppError::DuplicateEmail);
        }

        let (user, stored) = users.get_mut(id).ok_or(AppError::NotFound)?;
        if !email.is_empty() {
            user.email = email;
        }
        if !password.is_empty() {
            *stored = password;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        users.remove(id).map(|_| ()).ok_or(AppError::NotFound)
    }
}

#[derive(Default)]
struct FakeTodos {
    todos: Mutex<Vec<Todo>>,
}

impl FakeTodos {
    fn with_todo<F>(&self, id: &str, user_id: &str, f: F) -> AppResult<TodoResponse>
    where
        F: FnOnce(&mut Todo),
    {
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .iter_mut()
            .find(|t| t.id() == id && t.is_owned_by(user_id))
            .ok_or(AppError::NotFound)?;
        f(todo);
        Ok(TodoResponse::from(&*todo))
    }
}

#[async_trait]
impl TodoServiceClient for FakeTodos {
    async fn create_todo(
        &self,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse> {
        let todo = Todo::new(next_id("todo"), user_id.to_string(), title, description);
        let response = TodoResponse::from(&todo);
        self.todos.lock().unwrap().push(todo);
        Ok(response)
    }

    async fn get_todo(&self, id: &str, user_id: &str) -> AppResult<TodoResponse> {
        self.with_todo(id, user_id, |_| {})
    }

    async fn list_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .rev()
            .filter(|t| t.is_owned_by(user_id))
            .map(TodoResponse::from)
            .collect())
    }

    async fn list_completed_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>> {
        let todos = self.todos.lock().unwrap();
        let mut completed: Vec<TodoResponse> = todos
            .iter()
            .filter(|t| t.is_owned_by(user_id) && t.is_completed())
            .map(TodoResponse::from)
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(completed)
    }

    async fn update_todo(
        &self,
        id: &str,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse> {
        self.with_todo(id, user_id, |t| t.update(&title, &description))
    }

    async fn mark_todo_complete(
        &self,
        id: &str,
        user_id: &str,
        completed: bool,
    ) -> AppResult<TodoResponse> {
        self.with_todo(id, user_id, |t| t.mark_complete(completed))
    }

    async fn delete_todo(&self, id: &str, user_id: &str) -> AppResult<()> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| !(t.id() == id && t.is_owned_by(user_id)));
        if todos.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Backend that is never reachable.
struct DownUsers;

#[async_trait]
impl UserServiceClient for DownUsers {
    async fn create_user(&self, _: String, _: String) -> AppResult<UserResponse> {
        Err(AppError::service_unavailable("connection refused"))
    }

    async fn authenticate_user(&self, _: String, _: String) -> AppResult<UserResponse> {
        Err(AppError::service_unavailable("connection refused"))
    }

    async fn get_user(&self, _: &str) -> AppResult<UserResponse> {
        Err(AppError::service_unavailable("connection refused"))
    }

    async fn update_user(&self, _: &str, _: String, _: String) -> AppResult<UserResponse> {
        Err(AppError::service_unavailable("connection refused"))
    }

    async fn delete_user(&self, _: &str) -> AppResult<()> {
        Err(AppError::service_unavailable("connection refused"))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(&JwtConfig {
        secret: SECRET.to_string(),
        expiration_hours: 24,
    }))
}

fn app() -> Router {
    let state = AppState::new(
        Arc::new(FakeUsers::default()),
        Arc::new(FakeTodos::default()),
        tokens(),
    );
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Register a user and return their token and id.
async fn register(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn create_todo(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/todos",
        Some(token),
        Some(json!({ "title": title, "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/todos"].is_object());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "alice@example.com", "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let claims = tokens().verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, "alice@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = app();
    register(&app, "dup@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "dup@example.com", "password": "another123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "short@example.com", "password": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let app = app();
    let (_, user_id) = register(&app, "bob@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "bob@example.com", "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email_alike() {
    let app = app();
    register(&app, "carol@example.com").await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "wrong-password" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "secret123" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_backend_down_is_service_unavailable() {
    let state = AppState::new(Arc::new(DownUsers), Arc::new(FakeTodos::default()), tokens());
    let app = create_router(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "dave@example.com", "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}

// =============================================================================
// Bearer tokens
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/todos", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_tokens_rejected() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/todos", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = TokenService::new(&JwtConfig {
        secret: "some-other-secret-0123456789abcdefgh".to_string(),
        expiration_hours: 24,
    })
    .issue("user-x", "x@example.com")
    .unwrap();
    let (status, _) = send(&app, Method::GET, "/api/todos", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = TokenService::new(&JwtConfig {
        secret: SECRET.to_string(),
        expiration_hours: -1,
    })
    .issue("user-x", "x@example.com")
    .unwrap();
    let (status, _) = send(&app, Method::GET, "/api/todos", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Todos
// =============================================================================

#[tokio::test]
async fn test_todo_lifecycle() {
    let app = app();
    let (token, user_id) = register(&app, "erin@example.com").await;

    let created = create_todo(&app, &token, "Buy milk").await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["user_id"], user_id.as_str());
    assert_eq!(created["completed"], false);
    assert!(created.get("completed_at").is_none());

    let uri = format!("/api/todos/{id}");
    let (status, fetched) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Buy milk");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "description": "Two litres" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["description"], "Two litres");

    let (status, completed) = send(
        &app,
        Method::PUT,
        &format!("{uri}/complete"),
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["completed"], true);
    assert!(completed["completed_at"].is_string());

    let (status, reopened) = send(
        &app,
        Method::PUT,
        &format!("{uri}/complete"),
        Some(&token),
        Some(json!({ "completed": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(reopened.get("completed_at").is_none());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "todo deleted successfully");

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_todo_requires_title() {
    let app = app();
    let (token, _) = register(&app, "frank@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(&token),
        Some(json!({ "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_and_completed_filter() {
    let app = app();
    let (token, _) = register(&app, "grace@example.com").await;

    create_todo(&app, &token, "first").await;
    let second = create_todo(&app, &token, "second").await;
    create_todo(&app, &token, "third").await;

    send(
        &app,
        Method::PUT,
        &format!("/api/todos/{}/complete", second["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;

    let (status, all) = send(&app, Method::GET, "/api/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let (status, done) = send(
        &app,
        Method::GET,
        "/api/todos?completed=true",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let done = done.as_array().unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0]["title"], "second");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/todos?completed=maybe",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_todos_are_isolated_between_users() {
    let app = app();
    let (owner, _) = register(&app, "heidi@example.com").await;
    let (intruder, _) = register(&app, "ivan@example.com").await;

    let todo = create_todo(&app, &owner, "private").await;
    let uri = format!("/api/todos/{}", todo["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&intruder),
        Some(json!({ "title": "mine now" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/api/todos", Some(&intruder), None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, still_there) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["title"], "private");
}

// =============================================================================
// Current user
// =============================================================================

#[tokio::test]
async fn test_current_user_profile_and_update() {
    let app = app();
    let (token, user_id) = register(&app, "judy@example.com").await;
    register(&app, "taken@example.com").await;

    let (status, me) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user_id.as_str());

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users/me",
        Some(&token),
        Some(json!({ "email": "taken@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/users/me",
        Some(&token),
        Some(json!({ "password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "judy@example.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "judy@example.com", "password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_current_user_with_empty_fields_changes_nothing() {
    let app = app();
    let (token, _) = register(&app, "olivia@example.com").await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/users/me",
        Some(&token),
        Some(json!({ "email": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["email"], "olivia@example.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "olivia@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_current_user() {
    let app = app();
    let (token, _) = register(&app, "mallory@example.com").await;

    let (status, body) = send(&app, Method::DELETE, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user deleted successfully");

    // The token is still valid but the account is gone.
    let (status, _) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
