//! Glob-based discovery of connection documents.
//!
//! Connection types live as individual YAML files below an environment directory,
//! nested arbitrarily deep (`connections/dev/databases/postgres.yml`). The
//! [`PatternMatcher`] walks that tree and returns every file matching a glob such
//! as `**/*.yml`, relative to the directory searched.
//!
//! Matches are returned sorted so the generated request body does not depend on
//! directory iteration order.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Options used for every match: `*` does not cross directory boundaries, so
/// `*.yml` only matches top-level files while `**/*.yml` matches at any depth.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled glob pattern for finding documents in a directory tree.
///
/// # Examples
///
/// ```rust,no_run
/// use conngen_cli::pattern::PatternMatcher;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let matcher = PatternMatcher::new("**/*.yml")?;
/// assert!(matcher.matches(Path::new("databases/postgres.yml")));
///
/// let documents = matcher.find_matches(Path::new("connections/dev"))?;
/// println!("Found {} documents", documents.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
}

impl PatternMatcher {
    /// Compile a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not valid glob syntax.
    pub fn new(pattern_str: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern_str)
            .with_context(|| format!("Invalid glob pattern: {pattern_str}"))?;

        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
        })
    }

    /// Find all files below `base_path` matching the pattern.
    ///
    /// Returns paths relative to `base_path`, sorted lexicographically. Symlinks
    /// are not followed and unreadable entries are skipped.
    pub fn find_matches(&self, base_path: &Path) -> Result<Vec<PathBuf>> {
        debug!("Searching for pattern '{}' in {:?}", self.original_pattern, base_path);

        let mut matches = Vec::new();

        for entry in WalkDir::new(base_path)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            let path = entry.path();

            if let Ok(relative_path) = path.strip_prefix(base_path) {
                trace!("Checking path: {}", relative_path.display());

                if self.matches(relative_path) {
                    matches.push(relative_path.to_path_buf());
                }
            }
        }

        matches.sort();
        debug!("Found {} matches for pattern '{}'", matches.len(), self.original_pattern);
        Ok(matches)
    }

    /// Check a single relative path without touching the file system.
    pub fn matches(&self, path: &Path) -> bool {
        // Normalize separators so patterns written with `/` work on Windows paths.
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.pattern.matches_with(&path_str, MATCH_OPTIONS)
    }
}
