//! External command execution as a narrow capability.
//!
//! All repository and review-service data enters the gate through spawned
//! commands (`git`, `gh`). The [`CommandRunner`] trait keeps that boundary
//! narrow so tests can substitute a scripted fake.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Captured stdout, trailing whitespace trimmed.
    pub stdout: String,
    /// Captured stderr, trailing whitespace trimmed.
    pub stderr: String,
}

/// Capability to run an external command and capture its output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, capturing output.
    ///
    /// A non-zero exit is not an error at this layer; callers inspect
    /// [`CommandOutput::success`] or go through [`run_checked`].
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Run a command and map a non-zero exit to [`Error::CommandFailed`].
pub async fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
) -> Result<String> {
    let output = runner.run(program, args).await?;
    if output.success {
        Ok(output.stdout)
    } else {
        Err(Error::CommandFailed {
            command: format!("{program} {}", args.join(" ")),
            stderr: output.stderr,
        })
    }
}

/// Production runner that spawns real processes in a fixed working directory.
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    /// Create a runner whose commands execute in `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .await
            .map_err(|e| Error::CommandFailed {
                command: format!("{program} {}", args.join(" ")),
                stderr: format!("failed to spawn: {e}"),
            })?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}
