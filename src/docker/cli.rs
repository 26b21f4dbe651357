use crate::docker::ImageTool;
use crate::error::{Result, TaggerError};
use std::process::{Command, Output};
use tracing::debug;

/// Drives the docker command line client
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    /// Use the given executable (e.g., "docker" or "podman")
    pub fn new(binary: impl Into<String>) -> Self {
        DockerCli {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(binary = %self.binary, ?args, "running image tool");

        Command::new(&self.binary).args(args).output().map_err(|e| {
            TaggerError::command(format!("Failed to execute {}: {}", self.binary, e))
        })
    }

    fn run_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.run(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TaggerError::command(format!(
                "{} {} failed with exit code {}\nStderr: {}",
                self.binary,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        DockerCli::new("docker")
    }
}

impl ImageTool for DockerCli {
    fn tag(&self, source: &str, target: &str) -> Result<()> {
        self.run_checked(&["tag", source, target])
    }

    fn push(&self, image: &str) -> Result<()> {
        self.run_checked(&["push", image])
    }

    fn exists(&self, image: &str) -> Result<bool> {
        let output = self.run(&["manifest", "inspect", image])?;
        Ok(output.status.success())
    }
}
