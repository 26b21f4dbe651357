use crate::error::{Result, TaggerError};
use std::process::Command;
use tracing::debug;

/// Runs rendered build commands
pub trait CommandRunner {
    /// Run a command line, returning whether it exited successfully
    fn run(&self, command: &str) -> Result<bool>;
}

/// Runs commands through `sh -c`, inheriting stdout and stderr
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        ShellRunner {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        ShellRunner::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<bool> {
        debug!(shell = %self.shell, command, "running command");

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .status()
            .map_err(|e| {
                TaggerError::command(format!("Failed to execute {}: {}", self.shell, e))
            })?;

        Ok(status.success())
    }
}
