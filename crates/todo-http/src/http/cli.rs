//! CLI interface implementation for the Todo Server client

use super::{client::TodoClient, common::*};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::path::PathBuf;
use std::time::Duration;
use todo::{
    AuthToken, ClientSettings, ConnectionSettings, Credentials, LayeredSettings, PersistedConfig,
    SettingOverrides, TaskPatch, TodoError, default_config_path,
    task::{NO_TASK_ID, is_blank},
};

// =============================================================================
// CLI CONFIGURATION STRUCTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Command-line client for the Todo Server")]
#[command(version)]
pub struct Cli {
    /// Protocol used to reach the server (http or https)
    #[arg(long, global = true)]
    pub protocol: Option<String>,
    /// Server host name or IP address
    #[arg(long, global = true)]
    pub host: Option<String>,
    /// Server TCP port
    #[arg(long, global = true)]
    pub port: Option<u16>,
    /// Client config file (defaults to ~/.todo.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check that the server answers
    Ping,
    /// Log in and store the issued token in the config file
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a task
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one task, or every task when no id is given
    Get {
        #[arg(long)]
        id: Option<u64>,
    },
    /// Update a task; omitted fields keep their current value
    Update {
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        id: Option<u64>,
    },
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Flags that take part in settings resolution.
    pub fn overrides(&self) -> SettingOverrides {
        let (username, password) = match &self.command {
            Commands::Login { username, password } => (username.clone(), password.clone()),
            _ => (None, None),
        };

        SettingOverrides {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            username,
            password,
        }
    }
}

// =============================================================================
// COMMAND CONTEXT
// =============================================================================

/// Everything a command needs, built once at process start.
#[derive(Debug, Clone)]
pub struct CommandContext<S> {
    pub settings: S,
    pub config_path: PathBuf,
    pub timeout: Option<Duration>,
}

impl CommandContext<LayeredSettings> {
    /// Load the config file named by `cli` and layer the flags over it.
    pub fn from_cli(cli: &Cli) -> Result<Self, TodoError> {
        let config_path = cli.config_path();
        debug!("Using config file {}", config_path.display());
        let file = match PersistedConfig::load(&config_path) {
            // Login replaces an unreadable file instead of failing on it.
            Err(e) if matches!(cli.command, Commands::Login { .. }) => {
                warn!("Ignoring unreadable config file: {e}");
                None
            }
            result => result?,
        };

        Ok(Self {
            settings: LayeredSettings::new(cli.overrides(), file),
            config_path,
            timeout: cli.timeout.map(Duration::from_secs),
        })
    }
}

impl<S: ClientSettings> CommandContext<S> {
    pub fn connection(&self) -> Result<ConnectionSettings, TodoError> {
        ConnectionSettings::resolve(&self.settings)
    }

    pub fn client(&self) -> Result<TodoClient, TodoError> {
        let connection = self.connection()?;
        match self.timeout {
            Some(timeout) => TodoClient::with_timeout(&connection, timeout),
            None => TodoClient::new(&connection),
        }
    }

    /// A client carrying the persisted token; fails with `MissingToken` before any request.
    pub fn authenticated_client(&self) -> Result<TodoClient, TodoError> {
        let token = AuthToken::resolve(&self.settings)?;
        Ok(self.client()?.with_token(token))
    }
}

// =============================================================================
// COMMAND DISPATCHERS
// =============================================================================

pub async fn handle_cli_command(cli: Cli) -> Result<(), TodoError> {
    let context = CommandContext::from_cli(&cli)?;
    handle_command(&context, cli.command).await
}

pub async fn handle_command<S: ClientSettings>(
    context: &CommandContext<S>,
    command: Commands,
) -> Result<(), TodoError> {
    match command {
        Commands::Ping => handle_ping_command(context).await,
        Commands::Login { .. } => handle_login_command(context).await,
        Commands::Create { title, description } => {
            handle_create_command(context, title, description).await
        }
        Commands::Get { id } => handle_get_command(context, id).await,
        Commands::Update {
            id,
            title,
            description,
            status,
        } => {
            let patch = TaskPatch::new(title, description, status);
            handle_update_command(context, id, &patch).await
        }
        Commands::Delete { id } => handle_delete_command(context, id).await,
    }
}

pub async fn handle_ping_command<S: ClientSettings>(
    context: &CommandContext<S>,
) -> Result<(), TodoError> {
    let pong = context.client()?.ping().await?;
    println!("{}", pong.message);
    Ok(())
}

/// Log in with the flag credentials and persist connection settings plus token.
pub async fn handle_login_command<S: ClientSettings>(
    context: &CommandContext<S>,
) -> Result<(), TodoError> {
    let connection = context.connection()?;
    let credentials = Credentials::resolve(&context.settings)?;

    let token = context.client()?.login(&credentials).await?;
    PersistedConfig::new(&connection, &token).save(&context.config_path)?;

    println!(
        "Token acquired. Configuration written to {}",
        context.config_path.display()
    );
    Ok(())
}

pub async fn handle_create_command<S: ClientSettings>(
    context: &CommandContext<S>,
    title: Option<String>,
    description: Option<String>,
) -> Result<(), TodoError> {
    let title = required_text(title, "title")?;
    let description = required_text(description, "description")?;

    let client = context.authenticated_client()?;
    let task = client.create_task(&title, &description).await?;
    println!("{}", format_created_task(&task));
    Ok(())
}

pub async fn handle_get_command<S: ClientSettings>(
    context: &CommandContext<S>,
    id: Option<u64>,
) -> Result<(), TodoError> {
    let client = context.authenticated_client()?;
    let tasks = match id.filter(|id| *id != NO_TASK_ID) {
        Some(id) => vec![client.get_task(id).await?],
        None => client.list_tasks().await?,
    };
    println!("{}", format_task_table(&tasks));
    Ok(())
}

pub async fn handle_update_command<S: ClientSettings>(
    context: &CommandContext<S>,
    id: Option<u64>,
    patch: &TaskPatch,
) -> Result<(), TodoError> {
    let id = required_id(id)?;
    let client = context.authenticated_client()?;
    let task = client.update_task(id, patch).await?;
    println!("{}", format_task_table(std::slice::from_ref(&task)));
    Ok(())
}

pub async fn handle_delete_command<S: ClientSettings>(
    context: &CommandContext<S>,
    id: Option<u64>,
) -> Result<(), TodoError> {
    let id = required_id(id)?;
    let client = context.authenticated_client()?;
    let task = client.delete_task(id).await?;
    println!("{}", format_deleted_task(&task));
    Ok(())
}

fn required_text(value: Option<String>, field: &str) -> Result<String, TodoError> {
    value
        .filter(|value| !is_blank(value))
        .ok_or_else(|| TodoError::missing_argument(field))
}

fn required_id(id: Option<u64>) -> Result<u64, TodoError> {
    id.filter(|id| *id != NO_TASK_ID)
        .ok_or_else(|| TodoError::missing_argument("id"))
}
