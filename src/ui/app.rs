//! UI state and input handling, independent of the terminal.
//!
//! Key presses turn into [`Request`]s. The caller runs each one on its own
//! task (see [`dispatch`]) and feeds the resulting [`Outcome`] back through
//! [`App::apply`]. Requests are never ordered against each other; whichever
//! outcome arrives last is the one the list ends up showing.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    application::{create_form::CreateForm, todo_list::TodoList, update_flow::{UpdateButtons, UpdateDialog}},
    domain::{
        gateway::TodoGateway,
        todo::{NewTodoPayload, Todo, TodoId, UpdateTodoPayload},
    },
    error::ClientError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    CreateForm,
    Dialog(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Load,
    Create(NewTodoPayload),
    Update(TodoId, UpdateTodoPayload),
    Delete(TodoId),
}

#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Todo>, ClientError>),
    /// `None` when the create failed; the failure is already logged.
    Created(Option<Todo>),
    Updated(TodoId, Result<Todo, ClientError>),
    Deleted(TodoId, Result<(), ClientError>),
}

pub struct App {
    pub list: TodoList,
    pub form: CreateForm,
    pub buttons: UpdateButtons,
    pub focus: Focus,
    pub selected: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self { Self::new() }
}

impl App {
    pub fn new() -> Self {
        Self { list: TodoList::new(), form: CreateForm::new(), buttons: UpdateButtons::new(), focus: Focus::Table, selected: 0, should_quit: false }
    }

    pub fn selected_todo(&self) -> Option<&Todo> { self.list.todos().get(self.selected) }

    /// The dialog currently taking keyboard input, if any.
    pub fn active_dialog(&self) -> Option<(TodoId, &UpdateDialog)> {
        match self.focus {
            Focus::Dialog(id) => self.buttons.get(id).and_then(|b| b.dialog()).map(|d| (id, d)),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        // Only act on presses; repeats and releases would duplicate input
        if key.kind != KeyEventKind::Press { return None; }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        match self.focus {
            Focus::Table => self.handle_table_key(key.code),
            Focus::CreateForm => self.handle_form_key(key.code),
            Focus::Dialog(id) => self.handle_dialog_key(id, key.code),
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) -> Option<Request> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => { if self.selected > 0 { self.selected -= 1; } }
            KeyCode::Down => { if self.selected + 1 < self.list.len() { self.selected += 1; } }
            KeyCode::Char('n') | KeyCode::Tab => self.focus = Focus::CreateForm,
            KeyCode::Char('u') | KeyCode::Enter => {
                let todo = self.selected_todo()?.clone();
                self.buttons.button(todo.id).open(&todo);
                self.focus = Focus::Dialog(todo.id);
            }
            KeyCode::Char('d') => return self.selected_todo().map(|t| Request::Delete(t.id)),
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Option<Request> {
        match code {
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Table,
            KeyCode::Enter => return self.form.submit().map(Request::Create),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.push(c),
            _ => {}
        }
        None
    }

    fn handle_dialog_key(&mut self, id: TodoId, code: KeyCode) -> Option<Request> {
        let button = self.buttons.button(id);
        match code {
            KeyCode::Esc => {
                button.cancel();
                self.focus = Focus::Table;
            }
            KeyCode::Enter => return button.request().map(|(id, payload)| Request::Update(id, payload)),
            KeyCode::Tab => { if let Some(dialog) = button.dialog_mut() { dialog.toggle_completed(); } }
            KeyCode::Backspace => { if let Some(dialog) = button.dialog_mut() { dialog.backspace(); } }
            KeyCode::Char(c) => { if let Some(dialog) = button.dialog_mut() { dialog.push(c); } }
            _ => {}
        }
        None
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(result) => self.list.apply_loaded(result),
            Outcome::Created(Some(todo)) => self.list.create_todo(todo),
            Outcome::Created(None) => {}
            Outcome::Updated(id, result) => {
                if let Some(todo) = self.buttons.button(id).complete(result) {
                    self.list.update_todo(todo);
                    if self.focus == Focus::Dialog(id) { self.focus = Focus::Table; }
                }
            }
            Outcome::Deleted(id, Ok(())) => {
                self.list.remove(id);
                self.buttons.retain_rows(self.list.todos());
                if self.focus == Focus::Dialog(id) { self.focus = Focus::Table; }
            }
            Outcome::Deleted(id, Err(e)) => tracing::error!(%id, error = %e, "delete request did not complete"),
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.list.len();
        if len == 0 { self.selected = 0; } else if self.selected >= len { self.selected = len - 1; }
    }
}

pub async fn perform<G: TodoGateway + ?Sized>(gateway: &G, request: Request) -> Outcome {
    match request {
        Request::Load => Outcome::Loaded(gateway.list().await),
        Request::Create(payload) => Outcome::Created(CreateForm::create(gateway, payload).await),
        Request::Update(id, payload) => Outcome::Updated(id, gateway.update(id, payload).await),
        Request::Delete(id) => Outcome::Deleted(id, gateway.delete(id).await),
    }
}

/// Runs `request` on a detached task and reports back over `tx`.
pub fn dispatch<G: TodoGateway + ?Sized>(gateway: Arc<G>, request: Request, tx: UnboundedSender<Outcome>) {
    tokio::spawn(async move {
        let outcome = perform(&*gateway, request).await;
        // Receiver is gone only while shutting down
        let _ = tx.send(outcome);
    });
}
