//! `conngen validate`: load and resolve without writing anything.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{environment_or_default, load_and_resolve};
use crate::config::GeneratorConfig;

/// Check that every connection in an environment loads and resolves.
///
/// Exits non-zero on the first missing ancestor, cycle, malformed parameter or
/// unparsable document. Git lookups are skipped unless `--git` is passed.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Environment directory under the connections root (dev, stage, prod)
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Root directory holding one directory per environment
    #[arg(long, value_name = "DIR")]
    pub connections_dir: Option<PathBuf>,

    /// Also check that every document has git history
    #[arg(long)]
    pub git: bool,

    /// Output format for the summary
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Summary output format.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl ValidateCommand {
    pub async fn execute(self, mut config: GeneratorConfig, quiet: bool) -> Result<()> {
        if let Some(dir) = self.connections_dir {
            config.connections_dir = dir;
        }
        config.git_timestamps = self.git;

        let environment = environment_or_default(self.environment);
        let resolved = load_and_resolve(&config, &environment).await?;

        let records = resolved.store.resolved_records();
        let hidden = records.iter().filter(|record| !record.is_visible()).count();

        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "valid": true,
                    "environment": resolved.environment,
                    "connections": records.len(),
                    "inherited": resolved.inherited,
                    "hidden": hidden,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text => {
                if !quiet {
                    println!(
                        "{} {} connections in {} are valid ({} inherited, {} hidden)",
                        "✓".green(),
                        records.len(),
                        resolved.environment.bold(),
                        resolved.inherited,
                        hidden
                    );
                }
            }
        }

        Ok(())
    }
}
