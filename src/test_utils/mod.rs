//! Test utilities for conngen
//!
//! Helpers for building throwaway connection trees on disk and for turning on
//! logging inside tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use conngen_cli::test_utils::ConnectionsDir;
//!
//! let dir = ConnectionsDir::new().unwrap();
//! dir.write("dev", "base.yml", "id: base\nparameters: []\n").unwrap();
//! assert!(dir.environment("dev").join("base.yml").exists());
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` when set, otherwise stays silent.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A temporary connections root with one directory per environment.
///
/// Layout: `<temp>/connections/<environment>/<file>`. The temp directory is
/// removed when this value is dropped.
pub struct ConnectionsDir {
    temp: TempDir,
}

impl ConnectionsDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir()?;
        std::fs::create_dir_all(temp.path().join("connections"))?;
        Ok(Self { temp })
    }

    /// The temporary working directory holding `connections/`.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// The connections root passed to `--connections-dir`.
    pub fn connections(&self) -> PathBuf {
        self.temp.path().join("connections")
    }

    pub fn environment(&self, environment: &str) -> PathBuf {
        self.connections().join(environment)
    }

    /// Write a document at `connections/<environment>/<relative>`, creating parents.
    pub fn write(&self, environment: &str, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.environment(environment).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a file relative to the working directory, e.g. a `conngen.toml`.
    pub fn write_root_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a file relative to the working directory.
    pub fn read_root_file(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.root().join(relative))?)
    }
}

/// Builds connection documents without hand-writing YAML in every test.
#[derive(Debug, Clone, Default)]
pub struct ConnectionFixture {
    lines: Vec<String>,
}

impl ConnectionFixture {
    pub fn new(id: &str) -> Self {
        Self {
            lines: vec![format!("id: {id}")],
        }
    }

    pub fn inherit_from(mut self, parent: &str) -> Self {
        self.lines.push(format!("inherit_from: {parent}"));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.lines.push("visible: false".to_string());
        self
    }

    /// Add a top-level scalar attribute, written verbatim.
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("{key}: {value}"));
        self
    }

    /// Add a `parameters` list of `(airflow_param_name, is_in_extra)` pairs.
    pub fn parameters(self, params: &[(&str, bool)]) -> Self {
        self.parameter_list("parameters", params)
    }

    /// Add a `+parameters` list of `(airflow_param_name, is_in_extra)` pairs.
    pub fn supplemental(self, params: &[(&str, bool)]) -> Self {
        self.parameter_list("+parameters", params)
    }

    fn parameter_list(mut self, key: &str, params: &[(&str, bool)]) -> Self {
        self.lines.push(format!("{key}:"));
        for (name, in_extra) in params {
            self.lines.push(format!("  - airflow_param_name: {name}"));
            self.lines.push(format!("    is_in_extra: {in_extra}"));
        }
        self
    }

    pub fn to_yaml(&self) -> String {
        let mut yaml = self.lines.join("\n");
        yaml.push('\n');
        yaml
    }
}
