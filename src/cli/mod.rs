//! Command-line interface for conngen.
//!
//! ```text
//! conngen generate [ENVIRONMENT] [SHA]   # write <env>-connection-types-request-body.json
//! conngen validate [ENVIRONMENT]         # load and resolve, write nothing
//! ```
//!
//! Both positionals are optional and fall back to `dev` and `test`. Global flags
//! control logging (`-v` / `-q`) and the config file (`-c` / `CONNGEN_CONFIG`).
//!
//! Logging goes to stderr through `tracing`. `--verbose` selects `debug`,
//! `--quiet` selects `error`, and otherwise `RUST_LOG` is honoured with `info`
//! as the fallback.

mod common;
mod generate;
mod validate;

pub use common::{ResolvedEnvironment, load_and_resolve};
pub use generate::GenerateCommand;
pub use validate::{OutputFormat, ValidateCommand};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

/// Aggregate connection type definitions into a single API request body.
#[derive(Parser, Debug)]
#[command(name = "conngen", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a conngen.toml (default: ./conngen.toml when present)
    #[arg(short, long, global = true, env = "CONNGEN_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the connection types request body for an environment
    Generate(GenerateCommand),

    /// Check that an environment's connections load and resolve
    Validate(ValidateCommand),
}

impl Cli {
    /// The log filter selected by the global flags.
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        }
    }

    /// Install the stderr subscriber. Safe to call more than once.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load configuration and run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = GeneratorConfig::load_with_optional(self.config).await?;

        match self.command {
            Commands::Generate(cmd) => cmd.execute(config, self.quiet).await,
            Commands::Validate(cmd) => cmd.execute(config, self.quiet).await,
        }
    }
}
