//! Per-row update control and its edit dialog.
//!
//! Each row owns an [`UpdateButton`] that is either closed or holds an open
//! [`UpdateDialog`]. The dialog keeps its own copy of the todo's fields taken
//! when it was opened; later changes to the row do not reach it.

use std::collections::BTreeMap;

use crate::{
    domain::{
        gateway::TodoGateway,
        todo::{Todo, TodoId, UpdateTodoPayload},
    },
    error::ClientError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDialog {
    text: String,
    completed: bool,
}

impl UpdateDialog {
    pub fn seeded_from(todo: &Todo) -> Self { Self { text: todo.text.clone(), completed: todo.completed } }

    pub fn text(&self) -> &str { &self.text }

    pub fn completed(&self) -> bool { self.completed }

    pub fn push(&mut self, c: char) { self.text.push(c); }

    pub fn backspace(&mut self) { self.text.pop(); }

    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    pub fn toggle_completed(&mut self) { self.completed = !self.completed; }

    pub fn payload(&self) -> UpdateTodoPayload { UpdateTodoPayload { text: self.text.clone(), completed: self.completed } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open(UpdateDialog),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateButton {
    id: TodoId,
    state: DialogState,
}

impl UpdateButton {
    pub fn new(id: TodoId) -> Self { Self { id, state: DialogState::Closed } }

    pub fn id(&self) -> TodoId { self.id }

    pub fn state(&self) -> &DialogState { &self.state }

    pub fn is_open(&self) -> bool { matches!(self.state, DialogState::Open(_)) }

    /// Opens the dialog seeded from `todo`. Does nothing if it is already open.
    pub fn open(&mut self, todo: &Todo) {
        if self.is_open() { return; }
        self.state = DialogState::Open(UpdateDialog::seeded_from(todo));
    }

    /// Closes without sending anything; local edits are dropped.
    pub fn cancel(&mut self) { self.state = DialogState::Closed; }

    pub fn dialog(&self) -> Option<&UpdateDialog> {
        match &self.state {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    pub fn dialog_mut(&mut self) -> Option<&mut UpdateDialog> {
        match &mut self.state {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    /// The request to send for the dialog's current values. The dialog stays
    /// open until [`UpdateButton::complete`] sees a successful response.
    pub fn request(&self) -> Option<(TodoId, UpdateTodoPayload)> {
        self.dialog().map(|dialog| (self.id, dialog.payload()))
    }

    /// Handles the server's answer. On success the dialog closes and the
    /// updated record is returned for the list; on failure the dialog stays as it is.
    pub fn complete(&mut self, result: Result<Todo, ClientError>) -> Option<Todo> {
        match result {
            Ok(todo) => {
                self.state = DialogState::Closed;
                Some(todo)
            }
            Err(e) => {
                tracing::error!(id = %self.id, error = %e, "failed to update todo");
                None
            }
        }
    }

    pub async fn submit<G: TodoGateway + ?Sized>(&mut self, gateway: &G) -> Option<Todo> {
        let (id, payload) = self.request()?;
        let result = gateway.update(id, payload).await;
        self.complete(result)
    }
}

/// One [`UpdateButton`] per row, created on first use.
#[derive(Debug, Clone, Default)]
pub struct UpdateButtons {
    buttons: BTreeMap<TodoId, UpdateButton>,
}

impl UpdateButtons {
    pub fn new() -> Self { Self::default() }

    pub fn button(&mut self, id: TodoId) -> &mut UpdateButton {
        self.buttons.entry(id).or_insert_with(|| UpdateButton::new(id))
    }

    pub fn get(&self, id: TodoId) -> Option<&UpdateButton> { self.buttons.get(&id) }

    pub fn get_mut(&mut self, id: TodoId) -> Option<&mut UpdateButton> { self.buttons.get_mut(&id) }

    pub fn is_open(&self, id: TodoId) -> bool { self.buttons.get(&id).is_some_and(UpdateButton::is_open) }

    /// Drops buttons whose rows are gone.
    pub fn retain_rows(&mut self, todos: &[Todo]) {
        self.buttons.retain(|id, _| todos.iter().any(|t| t.id == *id));
    }
}
