use async_trait::async_trait;

use super::todo::{NewTodoPayload, Todo, TodoId, UpdateTodoPayload};
use crate::error::ClientError;

/// Remote todo service as seen by the client.
///
/// `delete` only fails when the request never resolves; whatever status the
/// server answers with counts as acknowledgment.
#[async_trait]
pub trait TodoGateway: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create(&self, input: NewTodoPayload) -> Result<Todo, ClientError>;
    async fn update(&self, id: TodoId, input: UpdateTodoPayload) -> Result<Todo, ClientError>;
    async fn delete(&self, id: TodoId) -> Result<(), ClientError>;
}
