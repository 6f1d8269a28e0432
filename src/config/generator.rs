use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_CONNECTIONS_DIR, DEFAULT_DOCUMENT_PATTERN, DEFAULT_OUTPUT_TEMPLATE,
};
use crate::core::ConnGenError;
use crate::loader::LoadOptions;

fn default_connections_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONNECTIONS_DIR)
}

fn default_pattern() -> String {
    DEFAULT_DOCUMENT_PATTERN.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT_TEMPLATE.to_string()
}

const fn default_git_timestamps() -> bool {
    true
}

/// Generator settings from `conngen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root holding one directory per environment.
    #[serde(default = "default_connections_dir")]
    pub connections_dir: PathBuf,

    /// Glob selecting documents inside an environment directory.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Output path template; `{environment}` is replaced.
    #[serde(default = "default_output")]
    pub output: String,

    /// Record `last_commit_at` from git history.
    #[serde(default = "default_git_timestamps")]
    pub git_timestamps: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            connections_dir: default_connections_dir(),
            pattern: default_pattern(),
            output: default_output(),
            git_timestamps: default_git_timestamps(),
        }
    }
}

impl GeneratorConfig {
    /// Load from an explicit path, or from `./conngen.toml` if present, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing implicit file
    /// is not.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConnGenError::ConfigError {
                        message: format!("config file {} does not exist", path.display()),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => {
                let implicit = PathBuf::from(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Self::load_from(&implicit).await
                } else {
                    debug!("No {CONFIG_FILE_NAME} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(ConnGenError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// The environment's document directory.
    pub fn environment_dir(&self, environment: &str) -> PathBuf {
        self.connections_dir.join(environment)
    }

    /// The output path for `environment`.
    pub fn output_path(&self, environment: &str) -> PathBuf {
        PathBuf::from(self.output.replace("{environment}", environment))
    }

    /// Loader options for `environment`.
    pub fn load_options(&self, environment: &str) -> LoadOptions {
        LoadOptions {
            directory: self.environment_dir(environment),
            pattern: self.pattern.clone(),
            git_timestamps: self.git_timestamps,
        }
    }
}
