//! gRPC implementation for TodoService.

use std::sync::Arc;

use common::rpc::into_envelope;
use common::AppResult;
use proto::todo::{
    todo_service_server::TodoService as TodoServiceProto, CreateTodoRequest, CreateTodoResponse,
    DeleteTodoRequest, DeleteTodoResponse, GetTodoRequest, GetTodoResponse,
    ListCompletedTodosRequest, ListCompletedTodosResponse, ListTodosRequest, ListTodosResponse,
    MarkTodoCompleteRequest, MarkTodoCompleteResponse, Todo as TodoMessage, TodoList,
    UpdateTodoRequest, UpdateTodoResponse,
};
use proto::Ack;
use tonic::{Request, Response, Status};

use crate::service::TodoService;

/// gRPC service wrapper for TodoService.
pub struct TodoGrpcService {
    service: Arc<dyn TodoService>,
}

impl TodoGrpcService {
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl TodoServiceProto for TodoGrpcService {
    async fn create_todo(
        &self,
        request: Request<CreateTodoRequest>,
    ) -> Result<Response<CreateTodoResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .create_todo(req.user_id, req.title, req.description)
            .await
            .map(|todo| todo_to_proto(&todo));
        Ok(Response::new(into_envelope(result)))
    }

    async fn get_todo(
        &self,
        request: Request<GetTodoRequest>,
    ) -> Result<Response<GetTodoResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .get_todo(&req.id, &req.user_id)
            .await
            .map(|todo| todo_to_proto(&todo));
        Ok(Response::new(into_envelope(result)))
    }

    async fn list_todos(
        &self,
        request: Request<ListTodosRequest>,
    ) -> Result<Response<ListTodosResponse>, Status> {
        let req = request.into_inner();

        let result = if req.completed_only {
            self.service.list_completed_todos(&req.user_id).await
        } else {
            self.service.list_todos(&req.user_id).await
        };
        Ok(Response::new(into_envelope(list_to_proto(result))))
    }

    async fn list_completed_todos(
        &self,
        request: Request<ListCompletedTodosRequest>,
    ) -> Result<Response<ListCompletedTodosResponse>, Status> {
        let req = request.into_inner();

        let result = self.service.list_completed_todos(&req.user_id).await;
        Ok(Response::new(into_envelope(list_to_proto(result))))
    }

    async fn update_todo(
        &self,
        request: Request<UpdateTodoRequest>,
    ) -> Result<Response<UpdateTodoResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .update_todo(&req.id, &req.user_id, &req.title, &req.description)
            .await
            .map(|todo| todo_to_proto(&todo));
        Ok(Response::new(into_envelope(result)))
    }

    async fn mark_todo_complete(
        &self,
        request: Request<MarkTodoCompleteRequest>,
    ) -> Result<Response<MarkTodoCompleteResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .mark_todo_complete(&req.id, &req.user_id, req.completed)
            .await
            .map(|todo| todo_to_proto(&todo));
        Ok(Response::new(into_envelope(result)))
    }

    async fn delete_todo(
        &self,
        request: Request<DeleteTodoRequest>,
    ) -> Result<Response<DeleteTodoResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .service
            .delete_todo(&req.id, &req.user_id)
            .await
            .map(|()| Ack {});
        Ok(Response::new(into_envelope(result)))
    }
}

fn todo_to_proto(todo: &domain::Todo) -> TodoMessage {
    TodoMessage {
        id: todo.id().to_string(),
        user_id: todo.user_id().to_string(),
        title: todo.title().to_string(),
        description: todo.description().to_string(),
        completed: todo.is_completed(),
        created_at: todo.created_at().to_rfc3339(),
        updated_at: todo.updated_at().to_rfc3339(),
        completed_at: todo.completed_at().map(|at| at.to_rfc3339()),
    }
}

fn list_to_proto(result: AppResult<Vec<domain::Todo>>) -> AppResult<TodoList> {
    result.map(|todos| TodoList {
        todos: todos.iter().map(todo_to_proto).collect(),
    })
}
