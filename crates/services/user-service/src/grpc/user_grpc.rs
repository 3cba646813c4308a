//! gRPC implementation for UserService.
//!
//! Application errors are returned inside the response envelope; handlers
//! only fail with a `Status` on transport problems, which tonic raises itself.

use std::sync::Arc;

use common::rpc::into_envelope;
use proto::user::{
    user_service_server::UserService as UserServiceProto, AuthenticateUserRequest,
    AuthenticateUserResponse, CreateUserRequest, CreateUserResponse, DeleteUserRequest,
    DeleteUserResponse, GetUserRequest, GetUserResponse, UpdateUserRequest, UpdateUserResponse,
    User as UserMessage,
};
use proto::Ack;
use tonic::{Request, Response, Status};

use crate::service::UserService;

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .create_user(req.email, req.password)
            .await
            .map(|user| user_to_proto(&user));
        Ok(Response::new(into_envelope(result)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .get_user(&req.id)
            .await
            .map(|user| user_to_proto(&user));
        Ok(Response::new(into_envelope(result)))
    }

    async fn authenticate_user(
        &self,
        request: Request<AuthenticateUserRequest>,
    ) -> Result<Response<AuthenticateUserResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .authenticate_user(&req.email, &req.password)
            .await
            .map(|user| user_to_proto(&user));
        Ok(Response::new(into_envelope(result)))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .update_user(&req.id, req.email, req.password)
            .await
            .map(|user| user_to_proto(&user));
        Ok(Response::new(into_envelope(result)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();

        let result = self.service.delete_user(&req.id).await.map(|()| Ack {});
        Ok(Response::new(into_envelope(result)))
    }
}

/// Convert domain User to the public proto message (no password hash).
fn user_to_proto(user: &domain::User) -> UserMessage {
    UserMessage {
        id: user.id().to_string(),
        email: user.email().to_string(),
        created_at: user.created_at().to_rfc3339(),
        updated_at: user.updated_at().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use crate::service::UserManager;
    use common::rpc::from_envelope;
    use common::AppError;

    fn grpc(repo: MockUserRepository) -> UserGrpcService {
        UserGrpcService::new(Arc::new(UserManager::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn test_duplicate_email_travels_in_envelope() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|email| {
            Ok(Some(
                domain::User::new("u1".into(), email.to_string(), "password123").unwrap(),
            ))
        });

        let response = grpc(repo)
            .create_user(Request::new(CreateUserRequest {
                email: "taken@example.com".into(),
                password: "password123".into(),
            }))
            .await
            .expect("application errors must not become a Status")
            .into_inner();

        assert!(matches!(from_envelope(response), Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_authenticate_returns_public_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|email| {
            Ok(Some(
                domain::User::new("u1".into(), email.to_string(), "password123").unwrap(),
            ))
        });

        let response = grpc(repo)
            .authenticate_user(Request::new(AuthenticateUserRequest {
                email: "a@example.com".into(),
                password: "password123".into(),
            }))
            .await
            .unwrap()
            .into_inner();

        let user = from_envelope(response).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.email, "a@example.com");
        assert!(chrono::DateTime::parse_from_rfc3339(&user.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let response = grpc(repo)
            .delete_user(Request::new(DeleteUserRequest { id: "ghost".into() }))
            .await
            .unwrap()
            .into_inner();

        assert!(matches!(from_envelope(response), Err(AppError::NotFound)));
    }
}
