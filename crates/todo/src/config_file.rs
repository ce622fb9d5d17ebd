//! The on-disk client state written by `login`.

use crate::{
    TodoError,
    settings::{AuthToken, ConnectionSettings},
};
use directories::BaseDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".todo.yaml";

/// Connection settings and token as stored in the YAML config file.
///
/// Never carries a username or password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub token: String,
}

impl PersistedConfig {
    pub fn new(connection: &ConnectionSettings, token: &AuthToken) -> Self {
        Self {
            protocol: connection.protocol.clone(),
            host: connection.host.clone(),
            port: connection.port,
            token: token.as_str().to_string(),
        }
    }

    /// Read the config at `path`. A missing file is not an error and yields `None`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>, TodoError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file {} does not exist", path.display());
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| TodoError::from_load_error(e, path))?;

        if content.trim().is_empty() {
            debug!("Config file {} is empty", path.display());
            return Ok(Some(Self::default()));
        }

        let config: PersistedConfig =
            serde_yaml::from_str(&content).map_err(|e| TodoError::from_load_error(e, path))?;

        debug!("Loaded config from {}", path.display());
        Ok(Some(config))
    }

    /// Write the config to `path`, replacing whatever was there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TodoError> {
        let path = path.as_ref();
        let content =
            serde_yaml::to_string(self).map_err(|e| TodoError::from_persist_error(e, path))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TodoError::from_persist_error(e, path))?;
            }
        }

        std::fs::write(path, content).map_err(|e| TodoError::from_persist_error(e, path))?;
        restrict_to_owner(path)?;

        info!("Wrote config file {}", path.display());
        Ok(())
    }
}

/// The file holds a bearer token; keep it `0600`.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<(), TodoError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| TodoError::from_persist_error(e, path))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<(), TodoError> {
    Ok(())
}

/// `~/.todo.yaml`, or `./.todo.yaml` when no home directory is known.
pub fn default_config_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}
