//! The remote command execution contract.

use async_trait::async_trait;

use sharelink_core::{AppError, AppResult};

/// Decoded output of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Decoded, trimmed standard output.
    pub stdout: String,
    /// Decoded, trimmed standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Output with only a stdout stream, as most successful commands have.
    pub fn stdout_only(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Executes one command on the remote host and returns its decoded output.
///
/// Implementations open a fresh authenticated channel per call; there is
/// no pooling and no two commands are ever in flight concurrently from
/// this engine.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run `command` remotely, answering the elevation prompt, and return
    /// both output streams.
    async fn execute(&self, command: &str) -> AppResult<CommandOutput>;
}

/// Prefix a command for privileged execution. The password is written to
/// the channel right after the command is issued, satisfying the `-S`
/// prompt.
pub fn elevated(command: &str) -> String {
    format!("sudo -S {command}")
}

/// Decode a raw output stream, substituting the replacement character for
/// undecodable byte sequences. Never fails.
pub fn decode_stream(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

/// Apply the failure rule for remote commands: stderr with an empty stdout
/// is a failure, stderr noise alongside real output is not (elevation
/// prompts routinely write to stderr).
pub fn interpret_output(stdout: String, stderr: String) -> AppResult<CommandOutput> {
    if !stderr.is_empty() && stdout.is_empty() {
        return Err(AppError::remote_command(format!(
            "remote command failed: {stderr}"
        )));
    }
    Ok(CommandOutput { stdout, stderr })
}
