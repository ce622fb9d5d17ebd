//! reqwest client for the Todo Server REST API

use super::common::*;
use super::error::{Operation, check_status};
use log::{debug, info};
use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use todo::{
    AuthToken, ConnectionSettings, CreatedTask, Credentials, Task, TaskPatch, TodoError,
    task::NO_TASK_ID,
};

/// Issues one HTTP request per operation against a single Todo Server.
///
/// Nothing is retried. Calls that need authentication fail with
/// [`TodoError::MissingToken`] unless a token was attached with
/// [`TodoClient::with_token`].
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<AuthToken>,
}

impl TodoClient {
    pub fn new(connection: &ConnectionSettings) -> Result<Self, TodoError> {
        Self::build_with_config(connection, |builder| builder)
    }

    /// Same as [`TodoClient::new`] but every request gives up after `timeout`.
    pub fn with_timeout(
        connection: &ConnectionSettings,
        timeout: Duration,
    ) -> Result<Self, TodoError> {
        Self::build_with_config(connection, |builder| builder.timeout(timeout))
    }

    fn build_with_config<F>(connection: &ConnectionSettings, config_fn: F) -> Result<Self, TodoError>
    where
        F: FnOnce(reqwest::ClientBuilder) -> reqwest::ClientBuilder,
    {
        let http = config_fn(reqwest::Client::builder())
            .build()
            .map_err(|e| TodoError::from_transport_error(e, "build HTTP client"))?;

        Ok(Self {
            http,
            base_url: connection.base_url(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // UNAUTHENTICATED OPERATIONS
    // =========================================================================

    pub async fn ping(&self) -> Result<PongMessage, TodoError> {
        let request = self.request(reqwest::Method::GET, PING_PATH, Operation::Ping)?;
        self.execute(request, Operation::Ping, "ping").await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, TodoError> {
        let body = LoginRequest {
            username: credentials.username().to_string(),
            password: credentials.password().to_string(),
        };
        let request = self
            .request(reqwest::Method::POST, AUTH_PATH, Operation::Login)?
            .json(&body);

        let response: LoginResponse = self.execute(request, Operation::Login, "login").await?;
        info!("Token acquired for user {}", credentials.username());
        Ok(AuthToken::new(&response.token))
    }

    // =========================================================================
    // TASK OPERATIONS
    // =========================================================================

    pub async fn create_task(
        &self,
        title: &str,
        description: &str,
    ) -> Result<CreatedTask, TodoError> {
        let body = CreateTaskRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        let request = self
            .request(reqwest::Method::POST, TASK_PATH, Operation::CreateTask)?
            .json(&body);

        let task: CreatedTask = self
            .execute(request, Operation::CreateTask, "create task")
            .await?;
        info!("Task created. TaskID: {}", task.id);
        Ok(task)
    }

    /// Fetch one task. The server wraps it in a one-element array.
    pub async fn get_task(&self, id: u64) -> Result<Task, TodoError> {
        require_id(id)?;
        let context = format!("get task {id}");
        let request = self.request(reqwest::Method::GET, &task_path(id), Operation::GetTask)?;

        let tasks: Vec<Task> = self.execute(request, Operation::GetTask, &context).await?;
        tasks
            .into_iter()
            .next()
            .ok_or(TodoError::NotFound { context })
    }

    /// All tasks owned by the token's user.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TodoError> {
        let request = self.request(reqwest::Method::GET, TASK_PATH, Operation::ListTasks)?;
        self.execute(request, Operation::ListTasks, "list tasks")
            .await
    }

    /// Partial update: fields left blank in `patch` keep their current value.
    ///
    /// Fetches the task first, so a missing task is reported as `NotFound`
    /// before any PATCH is sent.
    pub async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task, TodoError> {
        require_id(id)?;
        let context = format!("update task {id}");

        let current = self.get_task(id).await.map_err(|e| {
            if e.is_not_found() {
                TodoError::NotFound {
                    context: context.clone(),
                }
            } else {
                e
            }
        })?;

        let body = UpdateTaskRequest::from(&current.merged_with(patch));
        let request = self
            .request(reqwest::Method::PATCH, &task_path(id), Operation::UpdateTask)?
            .json(&body);

        let task: Task = self
            .execute(request, Operation::UpdateTask, &context)
            .await?;
        info!("Task(ID={}) is updated.", task.id);
        Ok(task)
    }

    pub async fn delete_task(&self, id: u64) -> Result<Task, TodoError> {
        require_id(id)?;
        let context = format!("delete task {id}");
        let request =
            self.request(reqwest::Method::DELETE, &task_path(id), Operation::DeleteTask)?;

        let task: Task = self
            .execute(request, Operation::DeleteTask, &context)
            .await?;
        info!("Task(ID={}) is deleted.", task.id);
        Ok(task)
    }

    // =========================================================================
    // REQUEST PLUMBING
    // =========================================================================

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        operation: Operation,
    ) -> Result<RequestBuilder, TodoError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");

        let builder = self.http.request(method, url);
        if !operation.requires_token() {
            return Ok(builder);
        }

        let token = self.token.as_ref().ok_or(TodoError::MissingToken)?;
        Ok(builder.header(AUTHORIZATION, token.header_value()))
    }

    /// Send, check the status, then drain and decode the body, in that order.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: Operation,
        context: &str,
    ) -> Result<T, TodoError> {
        let response = request
            .send()
            .await
            .map_err(|e| TodoError::from_transport_error(e, context))?;

        check_status(response.status(), operation, context)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| TodoError::from_read_error(e, context))?;

        serde_json::from_slice(&body).map_err(|e| {
            debug!("Undecodable body in {context}: {}", String::from_utf8_lossy(&body));
            TodoError::from_parse_error(e, context)
        })
    }
}

fn require_id(id: u64) -> Result<(), TodoError> {
    if id == NO_TASK_ID {
        return Err(TodoError::missing_argument("id"));
    }
    Ok(())
}
