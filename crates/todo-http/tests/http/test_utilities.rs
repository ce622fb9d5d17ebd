//! In-process stub of the Todo Server for integration tests.
//!
//! Implements the REST surface the client talks to, with per-user task
//! ownership, a fixed set of valid statuses and optional fault injection.

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use todo::{ConnectionSettings, Credentials, task::INITIAL_STATUS};
use todo_http::TodoClient;

pub const TEST_USER: (&str, &str) = ("test_user", "test_password");
pub const OTHER_USER: (&str, &str) = ("other_user", "other_password");
pub const VALID_STATUSES: [&str; 3] = ["TODO", "RUNNING", "DONE"];
pub const CREATED_AT: &str = "2019-03-02T10:00:00.000000+09:00";

/// Forced misbehaviour for every `/api/task` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Status(u16),
    MalformedBody,
    /// 200 with a body stream that breaks after the first chunk.
    TruncatedBody,
}

#[derive(Debug, Clone)]
struct StoredTask {
    owner: String,
    title: String,
    description: String,
    status: String,
}

#[derive(Debug, Default)]
pub struct StubState {
    users: HashMap<String, String>,
    tasks: BTreeMap<u64, StoredTask>,
    next_id: u64,
    fault: Option<Fault>,
    /// `(method path, Authorization header)` for every request received.
    pub requests: Vec<(String, Option<String>)>,
}

pub type SharedState = Arc<Mutex<StubState>>;

pub fn token_for(username: &str) -> String {
    format!("token-{username}")
}

pub struct TestServer {
    pub port: u16,
    pub state: SharedState,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let mut stub = StubState {
            next_id: 1,
            ..Default::default()
        };
        for (username, password) in [TEST_USER, OTHER_USER] {
            stub.users.insert(username.to_string(), password.to_string());
        }
        let state: SharedState = Arc::new(Mutex::new(stub));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let app = create_router(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Stub server stopped: {e}");
            }
        });

        Ok(TestServer {
            port,
            state,
            handle,
        })
    }

    pub fn connection(&self) -> ConnectionSettings {
        ConnectionSettings::new("http", "127.0.0.1", self.port)
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(&self.connection()).expect("Failed to build client")
    }

    /// A client holding a token obtained through a real login call.
    pub async fn logged_in_client(&self, user: (&str, &str)) -> TodoClient {
        let client = self.client();
        let token = client
            .login(&Credentials::new(user.0, user.1))
            .await
            .expect("Login against stub server failed");
        client.with_token(token)
    }

    pub fn set_fault(&self, fault: Option<Fault>) {
        self.state.lock().unwrap().fault = fault;
    }

    pub fn recorded_requests(&self) -> Vec<(String, Option<String>)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn stored_status(&self, id: u64) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.tasks.get(&id).map(|task| task.status.clone())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Temporary directory holding the client's config file.
pub struct TestConfig {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestConfig {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::Builder::new()
                .prefix("todo_http_")
                .tempdir()
                .expect("Failed to create temp directory"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }
}

// =============================================================================
// ROUTES
// =============================================================================

fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/auth", post(auth))
        .route("/api/task", get(list_tasks).post(create_task))
        .route(
            "/api/task/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .with_state(state)
}

fn record(state: &SharedState, request_line: String, headers: &HeaderMap) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().requests.push((request_line, authorization));
}

/// Resolve the requesting user, or the response to send instead.
fn authorize(state: &SharedState, headers: &HeaderMap) -> Result<String, Response> {
    let guard = state.lock().unwrap();

    if let Some(fault) = guard.fault {
        return Err(match fault {
            Fault::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Fault::MalformedBody => (StatusCode::OK, "<html>not json</html>").into_response(),
            Fault::TruncatedBody => (StatusCode::OK, truncated_body()).into_response(),
        });
    }

    let user = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("JWT "))
        .and_then(|token| {
            guard
                .users
                .keys()
                .find(|username| token_for(username) == token)
                .cloned()
        });

    user.ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response()
    })
}

/// Sends a partial JSON chunk, pauses so it is flushed, then aborts the stream.
fn truncated_body() -> Body {
    let chunks = futures_util::stream::unfold(0u8, |step| async move {
        match step {
            0 => Some((Ok(Bytes::from_static(b"[{\"id\": 1, ")), 1)),
            1 => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Some((Err(std::io::Error::other("stream aborted")), 2))
            }
            _ => None,
        }
    });
    Body::from_stream(chunks)
}

fn task_json(id: u64, task: &StoredTask) -> Value {
    json!({
        "id": id,
        "title": task.title,
        "description": task.description,
        "status": task.status,
    })
}

async fn ping(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    record(&state, "GET /api/ping".to_string(), &headers);
    Json(json!({"message": "pong"}))
}

async fn auth(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "POST /api/auth".to_string(), &headers);
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let guard = state.lock().unwrap();
    match guard.users.get(username) {
        Some(expected) if expected == password => {
            Json(json!({"token": token_for(username)})).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Unable to log in with provided credentials."]})),
        )
            .into_response(),
    }
}

async fn list_tasks(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    record(&state, "GET /api/task".to_string(), &headers);
    let user = match authorize(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let guard = state.lock().unwrap();
    let tasks: Vec<Value> = guard
        .tasks
        .iter()
        .filter(|(_, task)| task.owner == user)
        .map(|(id, task)| task_json(*id, task))
        .collect();
    Json(Value::Array(tasks)).into_response()
}

async fn create_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "POST /api/task".to_string(), &headers);
    let user = match authorize(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut guard = state.lock().unwrap();
    let id = guard.next_id;
    guard.next_id += 1;
    let task = StoredTask {
        owner: user,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        status: INITIAL_STATUS.to_string(),
    };
    let response = json!({
        "id": id,
        "title": task.title,
        "description": task.description,
        "created_at": CREATED_AT,
    });
    guard.tasks.insert(id, task);

    (StatusCode::CREATED, Json(response)).into_response()
}

async fn get_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    record(&state, format!("GET /api/task/{id}"), &headers);
    let user = match authorize(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let guard = state.lock().unwrap();
    match guard.tasks.get(&id).filter(|task| task.owner == user) {
        Some(task) => Json(json!([task_json(id, task)])).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!([]))).into_response(),
    }
}

async fn update_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    record(&state, format!("PATCH /api/task/{id}"), &headers);
    let user = match authorize(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut guard = state.lock().unwrap();
    let Some(task) = guard.tasks.get_mut(&id).filter(|task| task.owner == user) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let status = body["status"].as_str().unwrap_or_default();
    if !VALID_STATUSES.contains(&status) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    if let Some(title) = body["title"].as_str() {
        task.title = title.to_string();
    }
    if let Some(description) = body["description"].as_str() {
        task.description = description.to_string();
    }
    task.status = status.to_string();

    Json(task_json(id, task)).into_response()
}

async fn delete_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    record(&state, format!("DELETE /api/task/{id}"), &headers);
    let user = match authorize(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut guard = state.lock().unwrap();
    if !guard.tasks.get(&id).is_some_and(|task| task.owner == user) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match guard.tasks.remove(&id) {
        Some(task) => Json(json!({
            "id": id,
            "title": task.title,
            "description": task.description,
        }))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
