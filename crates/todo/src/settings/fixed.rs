//! Settings with fixed values, for tests and embedding.

use super::ClientSettings;
use crate::TodoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSettings {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl FixedSettings {
    pub fn new(protocol: &str, host: &str, port: u16) -> Self {
        Self {
            protocol: protocol.to_string(),
            host: host.to_string(),
            port,
            username: None,
            password: None,
            token: None,
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

impl ClientSettings for FixedSettings {
    fn protocol(&self) -> Result<String, TodoError> {
        Ok(self.protocol.clone())
    }

    fn host(&self) -> Result<String, TodoError> {
        Ok(self.host.clone())
    }

    fn port(&self) -> Result<u16, TodoError> {
        Ok(self.port)
    }

    fn username(&self) -> Result<String, TodoError> {
        self.username
            .clone()
            .ok_or_else(|| TodoError::missing_credential("username"))
    }

    fn password(&self) -> Result<String, TodoError> {
        self.password
            .clone()
            .ok_or_else(|| TodoError::missing_credential("password"))
    }

    fn token(&self) -> Result<String, TodoError> {
        self.token.clone().ok_or(TodoError::MissingToken)
    }
}
