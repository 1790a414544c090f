//! Wrapper around the Bitwarden CLI (`bw`)
//!
//! Every vault operation is one subprocess invocation: spawn, wait for exit,
//! capture stdout/stderr. Retry policy belongs to the caller, this layer only
//! classifies failures.

use std::{io, process::Stdio};
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Bitwarden CLI `{program}` not found in PATH. Please install it first")]
    NotFound { program: String },

    #[error("failed to run `{program} {operation}`: {source}")]
    Io {
        program: String,
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} {operation}` exited with code {code}: {stderr}")]
    Failed {
        program: String,
        operation: String,
        code: i32,
        stderr: String,
    },
}

/// Captured output of one successful agent invocation
#[derive(Debug)]
pub struct AgentOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl AgentOutput {
    /// Stdout and stderr as one printable string, for display
    #[must_use]
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&self.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }
        text
    }
}

/// Handle to the external vault agent executable
#[derive(Debug, Clone)]
pub struct Agent {
    program: String,
}

impl Agent {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawn the agent with the given arguments and wait for it to exit
    ///
    /// Exactly one subprocess per call. Stdin is closed so an agent that
    /// unexpectedly prompts cannot steal the terminal from the confirmation
    /// step.
    async fn run(&self, args: &[&str]) -> Result<AgentOutput, AgentError> {
        let operation = args.join(" ");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    AgentError::NotFound {
                        program: self.program.clone(),
                    }
                } else {
                    AgentError::Io {
                        program: self.program.clone(),
                        operation: operation.clone(),
                        source,
                    }
                }
            })?;

        if output.status.success() {
            Ok(AgentOutput {
                stdout: output.stdout,
                stderr: output.stderr,
            })
        } else {
            Err(AgentError::Failed {
                program: self.program.clone(),
                operation,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Availability probe, runs `bw --version`
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotFound` if the executable cannot be resolved,
    /// or the underlying failure if it cannot report its version
    pub async fn version(&self) -> Result<String, AgentError> {
        let output = self.run(&["--version"]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Synchronize the local vault cache, returns the agent's output
    ///
    /// # Errors
    ///
    /// Returns an error if the sync subprocess fails
    pub async fn sync(&self) -> Result<String, AgentError> {
        let output = self.run(&["sync"]).await?;
        Ok(output.combined())
    }

    /// List vault items as raw JSON, optionally constrained by a search term
    ///
    /// The term is passed through as a single argv entry, unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the list subprocess fails
    pub async fn list_items_raw(&self, search: Option<&str>) -> Result<Vec<u8>, AgentError> {
        let mut args = vec!["list", "items"];
        if let Some(term) = search {
            args.push("--search");
            args.push(term);
        }

        let output = self.run(&args).await?;
        Ok(output.stdout)
    }

    /// Delete one item by id, permanently or into the trash
    ///
    /// # Errors
    ///
    /// Returns an error if the delete subprocess fails
    pub async fn delete_item(&self, id: &str, permanent: bool) -> Result<(), AgentError> {
        let mut args = vec!["delete", "item", id];
        if permanent {
            args.push("--permanent");
        }

        self.run(&args).await?;
        Ok(())
    }
}
