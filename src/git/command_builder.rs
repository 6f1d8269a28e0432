//! Builder for running git subprocesses.
//!
//! Every git invocation goes through [`GitCommand`] so arguments, working
//! directory, timeout and logging are handled the same way. Output is captured and
//! a non-zero exit becomes [`ConnGenError::GitCommandError`].

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::{GIT_COMMAND, GIT_COMMAND_TIMEOUT};
use crate::core::ConnGenError;

/// Builder for a single git invocation. Every run is bounded by
/// [`GIT_COMMAND_TIMEOUT`].
#[derive(Default)]
pub struct GitCommand {
    /// Arguments passed after `git` (and after `-C <dir>` when set)
    args: Vec<String>,

    /// Directory passed to `git -C`
    current_dir: Option<PathBuf>,

    /// Label included in debug logs
    context: Option<String>,
}

/// Captured output of a successful git command.
#[derive(Debug, Clone)]
pub struct GitCommandOutput {
    /// Standard output from the git command
    pub stdout: String,
    /// Standard error output from the git command
    pub stderr: String,
}

impl GitCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The git operation name (first argument), for error reporting.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    /// Run the command and capture its output.
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let mut full_args = Vec::new();
        if let Some(dir) = &self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());

        match &self.context {
            Some(ctx) => tracing::debug!(
                target: "git",
                "({}) Executing command: {} {}",
                ctx,
                GIT_COMMAND,
                full_args.join(" ")
            ),
            None => tracing::debug!(
                target: "git",
                "Executing command: {} {}",
                GIT_COMMAND,
                full_args.join(" ")
            ),
        }

        let mut cmd = Command::new(GIT_COMMAND);
        cmd.args(&full_args).stdout(Stdio::piped()).stderr(Stdio::piped());

        let spawned = match timeout(GIT_COMMAND_TIMEOUT, cmd.output()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    target: "git",
                    "Command timed out after {} seconds: git {}",
                    GIT_COMMAND_TIMEOUT.as_secs(),
                    full_args.join(" ")
                );
                return Err(ConnGenError::GitCommandError {
                    operation: self.operation(),
                    stderr: format!(
                        "Git command timed out after {} seconds: git {}",
                        GIT_COMMAND_TIMEOUT.as_secs(),
                        full_args.join(" ")
                    ),
                }
                .into());
            }
        };

        let output = match spawned {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConnGenError::GitNotFound.into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to execute git {}", full_args.join(" "))));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "Error: {}", stderr);
            }

            return Err(ConnGenError::GitCommandError {
                operation: self.operation(),
                stderr,
            }
            .into());
        }

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }

    /// `git -C <dir> log -1 --pretty=format:%cI -- <file>`: committer date of the
    /// last commit touching `path`.
    ///
    /// Git runs in the file's own directory, so the lookup finds the repository
    /// holding the document wherever the generator is started from.
    pub fn last_commit_date(path: &Path) -> Self {
        let command = Self::new().args(["log", "-1", "--pretty=format:%cI", "--"]);
        let command = match (path.parent(), path.file_name()) {
            (Some(dir), Some(file)) if !dir.as_os_str().is_empty() => {
                command.current_dir(dir).arg(file.to_string_lossy())
            }
            _ => command.arg(path.display().to_string()),
        };
        command.with_context("last commit date")
    }
}
