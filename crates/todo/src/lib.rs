//! Core types for the Todo Server client.
//!
//! Holds the task model, the error taxonomy, settings resolution and the
//! persisted client config. The HTTP side lives in `todo-http`.

pub mod config_file;
pub mod error;
pub mod settings;
pub mod task;
pub mod telemetry;

pub use config_file::{PersistedConfig, default_config_path};
pub use error::TodoError;
pub use settings::{
    AuthToken, ClientSettings, ConnectionSettings, Credentials, FixedSettings, LayeredSettings,
    SettingOverrides,
};
pub use task::{CreatedTask, Task, TaskPatch};

// Re-export logging macros for consistent usage across the crate
pub use log::{debug, error, info, trace, warn};
