//! SSH implementation of [`RemoteExecutor`].
//!
//! One TCP connection, SSH session, and exec channel per call. The channel
//! requests a PTY and writes the elevation password immediately after
//! issuing the command, matching what `sudo -S` expects. libssh2 is a
//! blocking library, so each call runs under `spawn_blocking` with an
//! explicit timeout around it.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use async_trait::async_trait;
use ssh2::Session;
use tracing::debug;

use sharelink_core::config::remote::RemoteConfig;
use sharelink_core::{AppError, AppResult};

use crate::executor::{CommandOutput, RemoteExecutor, decode_stream, interpret_output};

/// Executes commands over SSH with password authentication.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    config: RemoteConfig,
}

impl SshExecutor {
    /// Create an executor for a fixed endpoint/credential set.
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    async fn execute(&self, command: &str) -> AppResult<CommandOutput> {
        let config = self.config.clone();
        let command = command.to_string();
        let timeout = Duration::from_secs(config.command_timeout_seconds);

        debug!(host = %config.host, "Executing remote command");

        let task = tokio::task::spawn_blocking(move || run_channel(&config, &command));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => {
                let (stdout, stderr) = result?;
                interpret_output(stdout, stderr)
            }
            Ok(Err(join_err)) => Err(AppError::internal(format!(
                "remote execution task panicked: {join_err}"
            ))),
            Err(_) => Err(AppError::remote_command(format!(
                "remote command timed out after {}s",
                self.config.command_timeout_seconds
            ))),
        }
    }
}

/// Open a channel, run the command, answer the elevation prompt, and read
/// both streams to completion.
fn run_channel(config: &RemoteConfig, command: &str) -> AppResult<(String, String)> {
    let tcp = TcpStream::connect((config.host.as_str(), config.port)).map_err(|e| {
        AppError::with_source(
            sharelink_core::error::ErrorKind::Connection,
            format!("failed to connect to {}:{}", config.host, config.port),
            e,
        )
    })?;

    let mut session = Session::new()
        .map_err(|e| AppError::connection(format!("failed to create SSH session: {e}")))?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|e| AppError::connection(format!("SSH handshake failed: {e}")))?;
    session
        .userauth_password(&config.username, &config.password)
        .map_err(|e| AppError::connection(format!("SSH authentication failed: {e}")))?;

    let mut channel = session
        .channel_session()
        .map_err(|e| AppError::connection(format!("failed to open SSH channel: {e}")))?;
    channel
        .request_pty("xterm", None, None)
        .map_err(|e| AppError::connection(format!("failed to request PTY: {e}")))?;
    channel
        .exec(command)
        .map_err(|e| AppError::remote_command(format!("failed to issue command: {e}")))?;

    // Satisfy the sudo -S prompt.
    channel
        .write_all(config.password.as_bytes())
        .and_then(|_| channel.write_all(b"\n"))
        .map_err(|e| AppError::remote_command(format!("failed to write credential: {e}")))?;

    let mut stdout_bytes = Vec::new();
    channel
        .read_to_end(&mut stdout_bytes)
        .map_err(|e| AppError::remote_command(format!("failed to read stdout: {e}")))?;

    let mut stderr_bytes = Vec::new();
    channel
        .stderr()
        .read_to_end(&mut stderr_bytes)
        .map_err(|e| AppError::remote_command(format!("failed to read stderr: {e}")))?;

    channel
        .wait_close()
        .map_err(|e| AppError::remote_command(format!("failed to close channel: {e}")))?;

    Ok((decode_stream(&stdout_bytes), decode_stream(&stderr_bytes)))
}
