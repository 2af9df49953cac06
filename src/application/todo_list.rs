//! The authoritative in-memory list of todos.
//!
//! The list is a cache of server state and only changes after the server has
//! answered. Each mutation comes in two halves: an async operation that talks
//! to the gateway, and a synchronous reconciliation step that the UI loop can
//! also call directly when the request ran on a detached task.

use crate::{
    domain::{
        gateway::TodoGateway,
        todo::{Todo, TodoId},
    },
    error::ClientError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self { Self::default() }

    pub fn todos(&self) -> &[Todo] { &self.todos }

    pub fn get(&self, id: TodoId) -> Option<&Todo> { self.todos.iter().find(|t| t.id == id) }

    pub fn len(&self) -> usize { self.todos.len() }

    pub fn is_empty(&self) -> bool { self.todos.is_empty() }

    /// Fetches the full list once. Failures are logged and leave the list as it was.
    pub async fn load<G: TodoGateway + ?Sized>(&mut self, gateway: &G) {
        self.apply_loaded(gateway.list().await);
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<Todo>, ClientError>) {
        match result {
            Ok(todos) => {
                tracing::info!(count = todos.len(), "todos loaded");
                self.todos = todos;
            }
            Err(e) => tracing::warn!(error = %e, "failed to load todos"),
        }
    }

    /// Appends a record the server just created.
    ///
    /// `completed` is always reset to false, whatever the server sent back.
    pub fn create_todo(&mut self, todo: Todo) {
        self.todos.push(Todo { id: todo.id, text: todo.text, completed: false });
    }

    /// Replaces the record with the same id. Unknown ids are ignored.
    pub fn update_todo(&mut self, updated: Todo) {
        match self.todos.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => *slot = updated,
            None => tracing::debug!(id = %updated.id, "update for a todo no longer in the list"),
        }
    }

    /// Sends the delete and drops the local copy once the request resolves,
    /// whatever status came back. Returns whether the removal happened.
    pub async fn delete_todo<G: TodoGateway + ?Sized>(&mut self, gateway: &G, id: TodoId) -> bool {
        match gateway.delete(id).await {
            Ok(()) => {
                self.remove(id);
                true
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "delete request did not complete");
                false
            }
        }
    }

    pub fn remove(&mut self, id: TodoId) { self.todos.retain(|t| t.id != id); }
}
