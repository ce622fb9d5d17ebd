//! Values produced by resolution, fixed for the rest of the invocation.

use super::ClientSettings;
use crate::TodoError;
use std::fmt;

/// Where and how to reach the Todo Server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl ConnectionSettings {
    pub fn new(protocol: &str, host: &str, port: u16) -> Self {
        Self {
            protocol: protocol.to_string(),
            host: host.to_string(),
            port,
        }
    }

    pub fn resolve<S: ClientSettings + ?Sized>(settings: &S) -> Result<Self, TodoError> {
        Ok(Self {
            protocol: settings.protocol()?,
            host: settings.host()?,
            port: settings.port()?,
        })
    }

    /// `protocol://host:port`, without a trailing slash. IPv6 literals are bracketed.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{}://[{}]:{}", self.protocol, self.host, self.port)
        } else {
            format!("{}://{}:{}", self.protocol, self.host, self.port)
        }
    }
}

/// Login input. Never written to disk.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn resolve<S: ClientSettings + ?Sized>(settings: &S) -> Result<Self, TodoError> {
        Ok(Self {
            username: settings.username()?,
            password: settings.password()?,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential issued by the server on login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn resolve<S: ClientSettings + ?Sized>(settings: &S) -> Result<Self, TodoError> {
        settings.token().map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("JWT {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
