//! Shared steps for the generator commands.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::GeneratorConfig;
use crate::constants::DEFAULT_ENVIRONMENT;
use crate::loader;
use crate::resolver::Resolver;
use crate::store::RecordStore;

/// The environment name to use, falling back to the default with a log line.
pub fn environment_or_default(environment: Option<String>) -> String {
    environment.unwrap_or_else(|| {
        info!("No environment given, defaulting to '{DEFAULT_ENVIRONMENT}'");
        DEFAULT_ENVIRONMENT.to_string()
    })
}

/// A fully resolved environment ready for filtering and output.
#[derive(Debug)]
pub struct ResolvedEnvironment {
    pub environment: String,
    pub store: RecordStore,
    /// Records that declared `inherit_from`
    pub inherited: usize,
}

/// Load every document for `environment` and resolve all inheritance.
pub async fn load_and_resolve(
    config: &GeneratorConfig,
    environment: &str,
) -> Result<ResolvedEnvironment> {
    let options = config.load_options(environment);
    info!("Using connections directory: {}", options.directory.display());

    let mut store = loader::load_store(&options)
        .await
        .with_context(|| format!("Failed to load connections for '{environment}'"))?;
    let inherited = store.pending_count();

    info!("Checking inheritance for {inherited} connections");
    Resolver::new(&mut store)
        .resolve_all()
        .with_context(|| format!("Failed to resolve connections for '{environment}'"))?;

    Ok(ResolvedEnvironment {
        environment: environment.to_string(),
        store,
        inherited,
    })
}
