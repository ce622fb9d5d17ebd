use crate::TodoError;

/// Source of every value a command needs before it can talk to the server.
///
/// The production implementation layers command-line flags over the persisted
/// config file; tests plug in fixed values.
pub trait ClientSettings {
    /// `http` or `https`.
    fn protocol(&self) -> Result<String, TodoError>;

    fn host(&self) -> Result<String, TodoError>;

    /// Destination TCP port, always greater than zero.
    fn port(&self) -> Result<u16, TodoError>;

    /// Login user name. Only ever taken from the command line.
    fn username(&self) -> Result<String, TodoError>;

    /// Login password. Only ever taken from the command line.
    fn password(&self) -> Result<String, TodoError>;

    /// Bearer token. Only ever taken from the persisted config.
    fn token(&self) -> Result<String, TodoError>;
}
