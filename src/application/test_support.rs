use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use http::StatusCode;

use crate::{
    domain::{
        gateway::TodoGateway,
        todo::{NewTodoPayload, Todo, TodoId, UpdateTodoPayload},
    },
    error::ClientError,
};

/// In-memory stand-in for the remote service. Failure switches answer with a 500.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    items: Arc<Mutex<Vec<Todo>>>,
    last_id: Arc<AtomicI64>,
    pub fail_list: Arc<AtomicBool>,
    pub fail_create: Arc<AtomicBool>,
    pub fail_update: Arc<AtomicBool>,
    pub fail_delete: Arc<AtomicBool>,
    /// Value the fake reports for `completed` on freshly created items.
    pub create_completed: Arc<AtomicBool>,
    deletes: Arc<Mutex<Vec<TodoId>>>,
}

impl InMemoryGateway {
    pub fn with_items(items: Vec<Todo>) -> Self {
        let gateway = Self::default();
        gateway.last_id.store(items.iter().map(|t| t.id.0).max().unwrap_or(0), Ordering::SeqCst);
        *gateway.items.lock().unwrap() = items;
        gateway
    }

    pub fn items(&self) -> Vec<Todo> { self.items.lock().unwrap().clone() }

    pub fn deletes(&self) -> Vec<TodoId> { self.deletes.lock().unwrap().clone() }

    fn server_error() -> ClientError {
        ClientError::Status { status: StatusCode::INTERNAL_SERVER_ERROR, body: "boom".into() }
    }
}

pub fn todo(id: i64, text: &str, completed: bool) -> Todo {
    Todo { id: TodoId(id), text: text.to_string(), completed }
}

#[async_trait]
impl TodoGateway for InMemoryGateway {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        if self.fail_list.load(Ordering::SeqCst) { return Err(Self::server_error()); }
        Ok(self.items())
    }

    async fn create(&self, input: NewTodoPayload) -> Result<Todo, ClientError> {
        if self.fail_create.load(Ordering::SeqCst) { return Err(Self::server_error()); }
        let id = TodoId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let todo = Todo { id, text: input.text, completed: self.create_completed.load(Ordering::SeqCst) };
        self.items.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: TodoId, input: UpdateTodoPayload) -> Result<Todo, ClientError> {
        if self.fail_update.load(Ordering::SeqCst) { return Err(Self::server_error()); }
        let mut items = self.items.lock().unwrap();
        let Some(todo) = items.iter_mut().find(|t| t.id == id) else {
            return Err(ClientError::Status { status: StatusCode::NOT_FOUND, body: String::new() });
        };
        todo.text = input.text;
        todo.completed = input.completed;
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        self.deletes.lock().unwrap().push(id);
        // Status is not part of the delete contract: a failing server still acknowledges.
        if !self.fail_delete.load(Ordering::SeqCst) {
            self.items.lock().unwrap().retain(|t| t.id != id);
        }
        Ok(())
    }
}
