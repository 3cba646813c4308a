//! gRPC client for user-service.

use async_trait::async_trait;
use tonic::transport::Channel;

use common::rpc::from_envelope;
use common::{AppError, AppResult, GrpcClientConfig};
use domain::UserResponse;
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, AuthenticateUserRequest,
    CreateUserRequest, DeleteUserRequest, GetUserRequest, UpdateUserRequest,
};

use super::{connect_channel, parse_timestamp, UserServiceClient};

/// gRPC client wrapper for user-service.
#[derive(Clone)]
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
}

impl UserClient {
    /// Connect to user-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = connect_channel(config).await?;
        Ok(Self {
            client: ProtoUserServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl UserServiceClient for UserClient {
    async fn create_user(&self, email: String, password: String) -> AppResult<UserResponse> {
        let request = tonic::Request::new(CreateUserRequest { email, password });

        let mut client = self.client.clone();
        let response = client.create_user(request).await.map_err(AppError::from)?;
        proto_to_user(from_envelope(response.into_inner())?)
    }

    async fn authenticate_user(
        &self,
        email: String,
        password: String,
    ) -> AppResult<UserResponse> {
        let request = tonic::Request::new(AuthenticateUserRequest { email, password });

        let mut client = self.client.clone();
        let response = client
            .authenticate_user(request)
            .await
            .map_err(AppError::from)?;
        proto_to_user(from_envelope(response.into_inner())?)
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let request = tonic::Request::new(GetUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.get_user(request).await.map_err(AppError::from)?;
        proto_to_user(from_envelope(response.into_inner())?)
    }

    async fn update_user(
        &self,
        id: &str,
        email: String,
        password: String,
    ) -> AppResult<UserResponse> {
        let request = tonic::Request::new(UpdateUserRequest {
            id: id.to_string(),
            email,
            password,
        });

        let mut client = self.client.clone();
        let response = client.update_user(request).await.map_err(AppError::from)?;
        proto_to_user(from_envelope(response.into_inner())?)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let request = tonic::Request::new(DeleteUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete_user(request).await.map_err(AppError::from)?;
        from_envelope(response.into_inner())?;
        Ok(())
    }
}

/// Convert proto User to the client-facing response.
fn proto_to_user(proto: proto::user::User) -> AppResult<UserResponse> {
    Ok(UserResponse {
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
        id: proto.id,
        email: proto.email,
    })
}
