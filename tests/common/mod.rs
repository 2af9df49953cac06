use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use todo_client::domain::todo::{Todo, TodoId};

/// Minimal in-process todo service speaking the same JSON as the real one.
#[derive(Clone, Default)]
pub struct FakeService {
    items: Arc<Mutex<Vec<Todo>>>,
    last_id: Arc<Mutex<i64>>,
    pub fail_create: Arc<AtomicBool>,
    pub fail_update: Arc<AtomicBool>,
    pub fail_delete: Arc<AtomicBool>,
    /// Reports `completed: true` on freshly created items.
    pub create_completed: Arc<AtomicBool>,
}

impl FakeService {
    pub fn seed(&self, todos: Vec<Todo>) {
        *self.last_id.lock().unwrap() = todos.iter().map(|t| t.id.0).max().unwrap_or(0);
        *self.items.lock().unwrap() = todos;
    }

    pub fn items(&self) -> Vec<Todo> { self.items.lock().unwrap().clone() }
}

pub fn todo(id: i64, text: &str, completed: bool) -> Todo {
    Todo { id: TodoId(id), text: text.to_string(), completed }
}

/// Binds to an ephemeral port and returns the base url.
pub async fn spawn(service: FakeService) -> String {
    let app = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", patch(update_todo).delete(delete_todo))
        .with_state(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

#[derive(Deserialize)]
struct CreateBody { text: String }

#[derive(Deserialize)]
struct UpdateBody { text: Option<String>, completed: Option<bool> }

async fn list_todos(State(svc): State<FakeService>) -> Json<Vec<Todo>> { Json(svc.items()) }

async fn create_todo(State(svc): State<FakeService>, Json(body): Json<CreateBody>) -> Response {
    if svc.fail_create.load(Ordering::SeqCst) { return (StatusCode::INTERNAL_SERVER_ERROR, "create failed").into_response(); }
    let id = {
        let mut last = svc.last_id.lock().unwrap();
        *last += 1;
        *last
    };
    let todo = todo(id, &body.text, svc.create_completed.load(Ordering::SeqCst));
    svc.items.lock().unwrap().push(todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn update_todo(State(svc): State<FakeService>, Path(id): Path<i64>, Json(body): Json<UpdateBody>) -> Response {
    if svc.fail_update.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "id": id, "text": "error page", "completed": false }))).into_response();
    }
    let mut items = svc.items.lock().unwrap();
    let Some(todo) = items.iter_mut().find(|t| t.id.0 == id) else { return StatusCode::NOT_FOUND.into_response() };
    if let Some(text) = body.text { todo.text = text; }
    if let Some(completed) = body.completed { todo.completed = completed; }
    Json(todo.clone()).into_response()
}

async fn delete_todo(State(svc): State<FakeService>, Path(id): Path<i64>) -> StatusCode {
    if svc.fail_delete.load(Ordering::SeqCst) { return StatusCode::INTERNAL_SERVER_ERROR; }
    svc.items.lock().unwrap().retain(|t| t.id.0 != id);
    StatusCode::NO_CONTENT
}
