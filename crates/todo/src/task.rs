//! Task records as exchanged with the Todo Server.

use serde::{Deserialize, Deserializer, Serialize};

/// Client-side marker for "no id supplied". The server never assigns it.
pub const NO_TASK_ID: u64 = 0;

/// Status the server gives every freshly created task.
pub const INITIAL_STATUS: &str = "TODO";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    // Absent from delete responses.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Body returned by a successful create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

/// Field changes for a partial update. A blank field keeps the server's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl Task {
    pub fn new(id: u64, title: &str, description: &str, status: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
        }
    }

    /// Overlay the non-blank fields of `patch` onto this task.
    pub fn merged_with(&self, patch: &TaskPatch) -> Task {
        Task {
            id: self.id,
            title: pick(&patch.title, &self.title),
            description: pick(&patch.description, &self.description),
            status: pick(&patch.status, &self.status),
        }
    }
}

impl TaskPatch {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        status: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            status: status.unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.title) && is_blank(&self.description) && is_blank(&self.status)
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn pick(candidate: &str, current: &str) -> String {
    if is_blank(candidate) {
        current.to_string()
    } else {
        candidate.to_string()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
