//! Remote shell endpoint configuration.

use serde::{Deserialize, Serialize};

/// SSH endpoint and credentials used for every remote command.
///
/// The same password authenticates the channel and answers the `sudo -S`
/// elevation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Remote host address.
    pub host: String,
    /// Remote SSH port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login username.
    pub username: String,
    /// Login and elevation password.
    pub password: String,
    /// Per-command timeout in seconds. A hung remote command is aborted
    /// after this long instead of blocking the engine forever.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

fn default_port() -> u16 {
    22
}

fn default_command_timeout() -> u64 {
    30
}
