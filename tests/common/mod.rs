//! Shared helpers for the integration suite.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::PathBuf;

use conngen_cli::test_utils::{ConnectionFixture, ConnectionsDir, init_test_logging};

/// A temporary project: a working directory with a `connections/` tree.
pub struct TestProject {
    dir: ConnectionsDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        init_test_logging(None);
        Ok(Self {
            dir: ConnectionsDir::new()?,
        })
    }

    pub fn root(&self) -> PathBuf {
        self.dir.root().to_path_buf()
    }

    pub fn connections(&self) -> PathBuf {
        self.dir.connections()
    }

    /// Write a fixture as `<id>.yml` in `environment`.
    pub fn add_connection(&self, environment: &str, file: &str, fixture: ConnectionFixture) -> Result<PathBuf> {
        self.dir.write(environment, file, &fixture.to_yaml())
    }

    /// Write a raw document in `environment`.
    pub fn add_document(&self, environment: &str, file: &str, content: &str) -> Result<PathBuf> {
        self.dir.write(environment, file, content)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        self.dir.write_root_file(relative, content)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        self.dir.read_root_file(relative)
    }

    /// Read and parse a JSON file from the working directory.
    pub fn read_json(&self, relative: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.read_file(relative)?)?)
    }

    /// Run `conngen` in the project root with the given arguments.
    pub fn run_conngen(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::cargo_bin("conngen")?
            .args(args)
            .current_dir(self.dir.root())
            .env("NO_COLOR", "1")
            .env_remove("CONNGEN_CONFIG")
            .env_remove("RUST_LOG")
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Captured result of a CLI invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    /// Assert the command exited with status 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}\nStderr: {}", self.stdout, self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
