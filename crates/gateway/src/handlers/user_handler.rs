//! Handlers for the caller's own account.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::UserResponse;

use crate::extractors::ValidatedJson;
use crate::handlers::MessageResponse;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Account update request. Omitted or empty fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCurrentUserRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// `""` is read the same as an omitted field, so it skips validation.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(get_current_user)
            .put(update_current_user)
            .delete(delete_current_user),
    )
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_client.get_user(&current_user.id).await?;
    Ok(Json(user))
}

/// Change email and/or password of the current user
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateCurrentUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCurrentUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_client
        .update_user(
            &current_user.id,
            payload.email.unwrap_or_default(),
            payload.password.unwrap_or_default(),
        )
        .await?;

    Ok(Json(user))
}

/// Delete the current user's account
///
/// Todos owned by the account are not removed.
#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn delete_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.user_client.delete_user(&current_user.id).await?;
    tracing::info!(user_id = %current_user.id, "Account deleted");
    Ok(Json(MessageResponse::new("user deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_read_as_unchanged() {
        let request: UpdateCurrentUserRequest =
            serde_json::from_str(r#"{"email":"","password":""}"#).unwrap();

        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_non_empty_fields_still_validated() {
        let request: UpdateCurrentUserRequest =
            serde_json::from_str(r#"{"email":"not-an-email"}"#).unwrap();

        assert!(request.password.is_none());
        assert!(request.validate().is_err());
    }
}
