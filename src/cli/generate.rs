//! `conngen generate`: build the request body for one environment.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use super::common::{environment_or_default, load_and_resolve};
use crate::config::GeneratorConfig;
use crate::constants::DEFAULT_SHA;
use crate::output::RequestBody;
use crate::resolver::filter::visible_records;

/// Generate the connection types request body.
///
/// Loads every document for the environment, resolves `inherit_from` chains,
/// drops connections marked `visible: false`, and writes
/// `{"ref": SHA, "connectionTypes": [...]}` with camelCase keys.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Environment directory under the connections root (dev, stage, prod)
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Commit sha recorded as the body's `ref`
    #[arg(value_name = "SHA")]
    pub sha: Option<String>,

    /// Root directory holding one directory per environment
    #[arg(long, value_name = "DIR")]
    pub connections_dir: Option<PathBuf>,

    /// Output file (default: <ENVIRONMENT>-connection-types-request-body.json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip git lookups; `last_commit_at` is omitted
    #[arg(long)]
    pub no_git: bool,
}

impl GenerateCommand {
    pub async fn execute(self, mut config: GeneratorConfig, quiet: bool) -> Result<()> {
        if let Some(dir) = self.connections_dir {
            config.connections_dir = dir;
        }
        if self.no_git {
            config.git_timestamps = false;
        }

        let environment = environment_or_default(self.environment);
        let sha = self.sha.unwrap_or_else(|| {
            info!("No sha given, defaulting to '{DEFAULT_SHA}'");
            DEFAULT_SHA.to_string()
        });

        let resolved = load_and_resolve(&config, &environment).await?;

        info!("Removing non-visible connections");
        let records = resolved.store.resolved_records();
        let published = visible_records(records.iter().copied());
        let hidden = records.len() - published.len();
        let published_count = published.len();

        let output = self.output.unwrap_or_else(|| config.output_path(&environment));
        RequestBody::new(&sha, published).write_to(&output)?;

        if !quiet {
            println!(
                "{} Wrote {} connection types for {} to {} ({} inherited, {} hidden)",
                "✓".green(),
                published_count,
                resolved.environment.bold(),
                output.display(),
                resolved.inherited,
                hidden
            );
        }

        Ok(())
    }
}
