// ABOUTME: Exec operations trait for running commands inside containers.
// ABOUTME: Used to drive consul/vault CLIs in started containers.

use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Command execution inside a running container.
#[async_trait]
pub trait ExecOps: Sealed + Send + Sync {
    /// Run a command to completion and collect its output.
    ///
    /// Output capture is runtime-dependent: Podman execs run detached, so
    /// `stdout` and `stderr` come back empty there and only the exit code
    /// carries information. Callers needing portable assertions should key
    /// on `ExecResult::success`.
    async fn exec(&self, id: &ContainerId, config: &ExecConfig) -> Result<ExecResult, ExecError>;
}

/// Exec configuration.
#[derive(Debug, Clone, Default)]
pub struct ExecConfig {
    /// Command and arguments to run.
    pub cmd: Vec<String>,
    /// Environment variables as KEY=value pairs.
    pub env: Vec<String>,
}

impl ExecConfig {
    pub fn command(cmd: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            cmd: cmd.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }
}

/// Result of an exec operation.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Exit code.
    pub exit_code: i64,
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: Vec<u8>,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// Errors from exec operations.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("exec failed: {0}")]
    Failed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
