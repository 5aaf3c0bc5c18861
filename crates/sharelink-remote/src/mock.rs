//! Scripted mock executor for tests.
//!
//! The engine is strictly sequential, so the mock holds an ordered queue
//! of expected calls. Each entry pairs a substring the incoming command
//! must contain with the output to return. Every call is also appended to
//! a log so tests can assert on exactly which remote commands were issued.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use sharelink_core::{AppError, AppResult};

use crate::executor::{CommandOutput, RemoteExecutor};

/// One scripted response.
#[derive(Debug, Clone)]
struct ScriptedCall {
    /// Substring the incoming command must contain.
    pattern: String,
    /// The result to return.
    result: Result<CommandOutput, String>,
}

/// In-memory [`RemoteExecutor`] returning scripted responses in order.
#[derive(Debug, Default)]
pub struct MockExecutor {
    script: Mutex<VecDeque<ScriptedCall>>,
    calls: Mutex<Vec<String>>,
}

impl MockExecutor {
    /// Create an empty mock. Any call against an empty script fails the
    /// test visibly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful call: the next command must contain `pattern`
    /// and returns `stdout`.
    pub fn expect(&self, pattern: &str, stdout: &str) {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        script.push_back(ScriptedCall {
            pattern: pattern.to_string(),
            result: Ok(CommandOutput::stdout_only(stdout)),
        });
    }

    /// Script a failing call: the next command must contain `pattern` and
    /// returns a remote-command error with `message`.
    pub fn expect_failure(&self, pattern: &str, message: &str) {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        script.push_back(ScriptedCall {
            pattern: pattern.to_string(),
            result: Err(message.to_string()),
        });
    }

    /// Commands executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl RemoteExecutor for MockExecutor {
    async fn execute(&self, command: &str) -> AppResult<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.to_string());

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(call) if command.contains(&call.pattern) => match call.result {
                Ok(output) => Ok(output),
                Err(message) => Err(AppError::remote_command(message)),
            },
            Some(call) => Err(AppError::internal(format!(
                "unexpected command: got '{command}', expected one containing '{}'",
                call.pattern
            ))),
            None => Err(AppError::internal(format!(
                "unexpected command with empty script: '{command}'"
            ))),
        }
    }
}
