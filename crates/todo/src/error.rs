use std::fmt;

/// Every failure a todo client operation can report.
///
/// Callers branch on the variant, never on the rendered message.
#[derive(Debug, Clone, PartialEq)]
pub enum TodoError {
    /// A login credential flag (`--username` / `--password`) was empty or absent.
    MissingCredential {
        field: String,
    },
    /// No token in the persisted config; the user has to run `login` again.
    MissingToken,
    /// A required command argument was empty or absent.
    MissingArgument {
        field: String,
    },
    /// The persisted config file exists but could not be read or parsed.
    ConfigLoad {
        path: String,
        reason: String,
    },
    /// Connection, DNS or TLS failure while talking to the server.
    Transport {
        context: String,
        reason: String,
    },
    NotFound {
        context: String,
    },
    /// The server rejected the requested task status (update only).
    InvalidStatus {
        context: String,
    },
    UnexpectedStatus {
        context: String,
        status: u16,
    },
    BodyReadFailure {
        context: String,
        reason: String,
    },
    BodyParseFailure {
        context: String,
        reason: String,
    },
    PersistFailure {
        path: String,
        reason: String,
    },
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::MissingCredential { field } => {
                write!(f, "Missing credential: --{field} must be provided")
            }
            TodoError::MissingToken => write!(
                f,
                "No authentication token found in the config file; run `login` first"
            ),
            TodoError::MissingArgument { field } => {
                write!(f, "Missing argument: --{field} must be provided")
            }
            TodoError::ConfigLoad { path, reason } => {
                write!(f, "Failed to load config file '{path}': {reason}")
            }
            TodoError::Transport { context, reason } => {
                write!(f, "Transport error in {context}: {reason}")
            }
            TodoError::NotFound { context } => write!(f, "Not found: {context}"),
            TodoError::InvalidStatus { context } => {
                write!(f, "Invalid task status in {context}")
            }
            TodoError::UnexpectedStatus { context, status } => {
                write!(f, "Unexpected HTTP status {status} in {context}")
            }
            TodoError::BodyReadFailure { context, reason } => {
                write!(f, "Failed to read response body in {context}: {reason}")
            }
            TodoError::BodyParseFailure { context, reason } => {
                write!(f, "Failed to parse response body in {context}: {reason}")
            }
            TodoError::PersistFailure { path, reason } => {
                write!(f, "Failed to write config file '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for TodoError {}

impl TodoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound { .. })
    }

    /// True when the user must re-authenticate before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, TodoError::MissingToken)
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TodoError::MissingCredential { .. }
                | TodoError::MissingToken
                | TodoError::MissingArgument { .. }
                | TodoError::ConfigLoad { .. }
        )
    }

    pub fn missing_credential(field: &str) -> Self {
        TodoError::MissingCredential {
            field: field.to_string(),
        }
    }

    pub fn missing_argument(field: &str) -> Self {
        TodoError::MissingArgument {
            field: field.to_string(),
        }
    }

    pub fn from_transport_error(e: impl fmt::Display, context: &str) -> Self {
        TodoError::Transport {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_read_error(e: impl fmt::Display, context: &str) -> Self {
        TodoError::BodyReadFailure {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_parse_error(e: impl fmt::Display, context: &str) -> Self {
        TodoError::BodyParseFailure {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_load_error(e: impl fmt::Display, path: &std::path::Path) -> Self {
        TodoError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_persist_error(e: impl fmt::Display, path: &std::path::Path) -> Self {
        TodoError::PersistFailure {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}
