//! Status-code policy shared by every Todo Server call

use log::warn;
use reqwest::StatusCode;
use todo::TodoError;

/// The remote operations the client knows how to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ping,
    Login,
    CreateTask,
    GetTask,
    ListTasks,
    UpdateTask,
    DeleteTask,
}

impl Operation {
    /// The only status code accepted as success.
    pub fn expected_status(self) -> StatusCode {
        match self {
            Operation::CreateTask => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    pub fn requires_token(self) -> bool {
        !matches!(self, Operation::Ping | Operation::Login)
    }
}

/// Map a response status to an outcome before any body is read.
///
/// The expected code passes; 404 is `NotFound`; 400 is `InvalidStatus` for
/// updates; anything else is `UnexpectedStatus`. Bodies are never consulted.
pub fn check_status(
    status: StatusCode,
    operation: Operation,
    context: &str,
) -> Result<(), TodoError> {
    if status == operation.expected_status() {
        return Ok(());
    }

    warn!("{context} returned HTTP {status}");
    match status {
        StatusCode::NOT_FOUND => Err(TodoError::NotFound {
            context: context.to_string(),
        }),
        StatusCode::BAD_REQUEST if operation == Operation::UpdateTask => {
            Err(TodoError::InvalidStatus {
                context: context.to_string(),
            })
        }
        other => Err(TodoError::UnexpectedStatus {
            context: context.to_string(),
            status: other.as_u16(),
        }),
    }
}
