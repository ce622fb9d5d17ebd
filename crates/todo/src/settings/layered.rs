//! Production settings: command-line flags layered over the persisted config.

use super::{ClientSettings, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROTOCOL};
use crate::{PersistedConfig, TodoError, task::is_blank};

/// Values given on the command line. `None`, blank strings and port 0 all mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingOverrides {
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolves each setting by value presence: flag, then config file, then default.
#[derive(Debug, Clone, Default)]
pub struct LayeredSettings {
    overrides: SettingOverrides,
    file: PersistedConfig,
}

impl LayeredSettings {
    /// `file` is `None` when no config file exists yet.
    pub fn new(overrides: SettingOverrides, file: Option<PersistedConfig>) -> Self {
        Self {
            overrides,
            file: file.unwrap_or_default(),
        }
    }
}

impl ClientSettings for LayeredSettings {
    fn protocol(&self) -> Result<String, TodoError> {
        Ok(layer(
            self.overrides.protocol.as_deref(),
            &self.file.protocol,
            DEFAULT_PROTOCOL,
        ))
    }

    fn host(&self) -> Result<String, TodoError> {
        Ok(layer(
            self.overrides.host.as_deref(),
            &self.file.host,
            DEFAULT_HOST,
        ))
    }

    fn port(&self) -> Result<u16, TodoError> {
        let port = [self.overrides.port.unwrap_or(0), self.file.port]
            .into_iter()
            .find(|port| *port != 0)
            .unwrap_or(DEFAULT_PORT);
        Ok(port)
    }

    fn username(&self) -> Result<String, TodoError> {
        flag_only(self.overrides.username.as_deref(), "username")
    }

    fn password(&self) -> Result<String, TodoError> {
        flag_only(self.overrides.password.as_deref(), "password")
    }

    fn token(&self) -> Result<String, TodoError> {
        if is_blank(&self.file.token) {
            return Err(TodoError::MissingToken);
        }
        Ok(self.file.token.clone())
    }
}

fn layer(flag: Option<&str>, file: &str, default: &str) -> String {
    [flag.unwrap_or(""), file]
        .into_iter()
        .find(|value| !is_blank(value))
        .unwrap_or(default)
        .to_string()
}

fn flag_only(flag: Option<&str>, field: &str) -> Result<String, TodoError> {
    match flag {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(TodoError::missing_credential(field)),
    }
}
