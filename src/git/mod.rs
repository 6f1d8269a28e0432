//! Git integration
//!
//! The generator asks git for one thing: when each connection document was last
//! committed. The answer is published as `last_commit_at` so the API can show how
//! fresh a definition is. Git is driven as a subprocess through
//! [`command_builder::GitCommand`], the same way a user would run it.

pub mod command_builder;

use anyhow::{Context, Result};
use chrono::DateTime;
use std::path::Path;
use tracing::warn;

pub use command_builder::{GitCommand, GitCommandOutput};

/// ISO-8601 committer date of the last commit touching `path`.
///
/// Returns `Ok(None)` when git has no history for the file (untracked or not yet
/// committed). A git failure, including running outside a repository, is an error.
pub async fn last_commit_date(path: &Path) -> Result<Option<String>> {
    let output = GitCommand::last_commit_date(path)
        .execute()
        .await
        .with_context(|| format!("Failed to read last commit date of {}", path.display()))?;

    parse_commit_date(&output.stdout, path)
}

fn parse_commit_date(stdout: &str, path: &Path) -> Result<Option<String>> {
    let date = stdout.trim();
    if date.is_empty() {
        warn!("No commit history for {}; omitting last_commit_at", path.display());
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(date).with_context(|| {
        format!("git returned an unexpected commit date '{date}' for {}", path.display())
    })?;

    Ok(Some(date.to_string()))
}
