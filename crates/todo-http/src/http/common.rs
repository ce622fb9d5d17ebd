//! HTTP API request and response types

use serde::{Deserialize, Serialize};
use todo::{CreatedTask, Task};

// =============================================================================
// ENDPOINTS
// =============================================================================

pub const PING_PATH: &str = "/api/ping";
pub const AUTH_PATH: &str = "/api/auth";
pub const TASK_PATH: &str = "/api/task";

pub fn task_path(id: u64) -> String {
    format!("{TASK_PATH}/{id}")
}

// =============================================================================
// AUTH API TYPES
// =============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PongMessage {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// TASK API TYPES
// =============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl From<&Task> for UpdateTaskRequest {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
        }
    }
}

// =============================================================================
// OUTPUT FORMATTING
// =============================================================================

pub fn format_created_task(task: &CreatedTask) -> String {
    format!(
        "ID: {}\nTITLE: {}\nDESCRIPTION: \n{}",
        task.id, task.title, task.description
    )
}

/// Tab-separated listing with an `ID Title Status Description` header.
pub fn format_task_table(tasks: &[Task]) -> String {
    let mut lines = vec!["ID\tTitle\tStatus\tDescription".to_string()];
    lines.extend(tasks.iter().map(|task| {
        format!(
            "{}\t{}\t{}\t{}",
            task.id, task.title, task.status, task.description
        )
    }));
    lines.join("\n")
}

/// Delete responses carry no status, so the column is left out.
pub fn format_deleted_task(task: &Task) -> String {
    format!(
        "ID\tTitle\tDescription\n{}\t{}\t{}",
        task.id, task.title, task.description
    )
}
