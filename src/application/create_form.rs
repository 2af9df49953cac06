use crate::domain::{
    gateway::TodoGateway,
    todo::{NewTodoPayload, Todo},
};

/// Single-line input for new todos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    input: String,
}

impl CreateForm {
    pub fn new() -> Self { Self::default() }

    pub fn input(&self) -> &str { &self.input }

    pub fn push(&mut self, c: char) { self.input.push(c); }

    pub fn backspace(&mut self) { self.input.pop(); }

    /// Takes the current text as a payload and clears the input right away,
    /// before any request is made. Blank input produces nothing to send.
    pub fn submit(&mut self) -> Option<NewTodoPayload> {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() { return None; }
        Some(NewTodoPayload { text })
    }

    /// Sends the create request. Failures are logged and yield `None`.
    pub async fn create<G: TodoGateway + ?Sized>(gateway: &G, payload: NewTodoPayload) -> Option<Todo> {
        match gateway.create(payload).await {
            Ok(todo) => {
                tracing::info!(id = %todo.id, "todo created");
                Some(todo)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create todo");
                None
            }
        }
    }
}
