//! Settings resolution: flag, then config file, then built-in default.

pub mod fixed;
pub mod layered;
pub mod resolved;
pub mod r#trait;

pub use fixed::FixedSettings;
pub use layered::{LayeredSettings, SettingOverrides};
pub use resolved::{AuthToken, ConnectionSettings, Credentials};
pub use r#trait::ClientSettings;

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 80;
