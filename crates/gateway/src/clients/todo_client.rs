//! gRPC client for todo-service.

use async_trait::async_trait;
use tonic::transport::Channel;

use common::rpc::from_envelope;
use common::{AppError, AppResult, GrpcClientConfig};
use domain::TodoResponse;
use proto::todo::{
    todo_service_client::TodoServiceClient as ProtoTodoServiceClient, CreateTodoRequest,
    DeleteTodoRequest, GetTodoRequest, ListCompletedTodosRequest, ListTodosRequest,
    MarkTodoCompleteRequest, TodoList, UpdateTodoRequest,
};

use super::{connect_channel, parse_timestamp, TodoServiceClient};

/// gRPC client wrapper for todo-service.
#[derive(Clone)]
pub struct TodoClient {
    client: ProtoTodoServiceClient<Channel>,
}

impl TodoClient {
    /// Connect to todo-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = connect_channel(config).await?;
        Ok(Self {
            client: ProtoTodoServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl TodoServiceClient for TodoClient {
    async fn create_todo(
        &self,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse> {
        let request = tonic::Request::new(CreateTodoRequest {
            user_id: user_id.to_string(),
            title,
            description,
        });

        let mut client = self.client.clone();
        let response = client.create_todo(request).await.map_err(AppError::from)?;
        proto_to_todo(from_envelope(response.into_inner())?)
    }

    async fn get_todo(&self, id: &str, user_id: &str) -> AppResult<TodoResponse> {
        let request = tonic::Request::new(GetTodoRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.get_todo(request).await.map_err(AppError::from)?;
        proto_to_todo(from_envelope(response.into_inner())?)
    }

    async fn list_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>> {
        let request = tonic::Request::new(ListTodosRequest {
            user_id: user_id.to_string(),
            completed_only: false,
        });

        let mut client = self.client.clone();
        let response = client.list_todos(request).await.map_err(AppError::from)?;
        proto_to_list(from_envelope(response.into_inner())?)
    }

    async fn list_completed_todos(&self, user_id: &str) -> AppResult<Vec<TodoResponse>> {
        let request = tonic::Request::new(ListCompletedTodosRequest {
            user_id: user_id.to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .list_completed_todos(request)
            .await
            .map_err(AppError::from)?;
        proto_to_list(from_envelope(response.into_inner())?)
    }

    async fn update_todo(
        &self,
        id: &str,
        user_id: &str,
        title: String,
        description: String,
    ) -> AppResult<TodoResponse> {
        let request = tonic::Request::new(UpdateTodoRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title,
            description,
        });

        let mut client = self.client.clone();
        let response = client.update_todo(request).await.map_err(AppError::from)?;
        proto_to_todo(from_envelope(response.into_inner())?)
    }

    async fn mark_todo_complete(
        &self,
        id: &str,
        user_id: &str,
        completed: bool,
    ) -> AppResult<TodoResponse> {
        let request = tonic::Request::new(MarkTodoCompleteRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
            completed,
        });

        let mut client = self.client.clone();
        let response = client
            .mark_todo_complete(request)
            .await
            .map_err(AppError::from)?;
        proto_to_todo(from_envelope(response.into_inner())?)
    }

    async fn delete_todo(&self, id: &str, user_id: &str) -> AppResult<()> {
        let request = tonic::Request::new(DeleteTodoRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.delete_todo(request).await.map_err(AppError::from)?;
        from_envelope(response.into_inner())?;
        Ok(())
    }
}

fn proto_to_todo(proto: proto::todo::Todo) -> AppResult<TodoResponse> {
    let completed_at = proto
        .completed_at
        .as_deref()
        .map(|at| parse_timestamp(at, "completed_at"))
        .transpose()?;

    Ok(TodoResponse {
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
        completed_at,
        id: proto.id,
        user_id: proto.user_id,
        title: proto.title,
        description: proto.description,
        completed: proto.completed,
    })
}

fn proto_to_list(list: TodoList) -> AppResult<Vec<TodoResponse>> {
    list.todos.into_iter().map(proto_to_todo).collect()
}
