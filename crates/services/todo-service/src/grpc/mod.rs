//! gRPC endpoint.

mod todo_grpc;

pub use todo_grpc::TodoGrpcService;
