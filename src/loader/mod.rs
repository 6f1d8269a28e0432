//! Loading connection documents into a [`RecordStore`].
//!
//! One environment's documents live under `<connections_dir>/<environment>`. The
//! loader finds them with a glob, parses each as YAML, and annotates the result
//! with where it came from:
//!
//! - `file_path`: the document path as discovered
//! - `last_commit_at`: committer date of the last commit touching the file
//! - `guide_path`: rewritten from document-relative to a path usable from the
//!   working directory
//!
//! Parameter examples are normalized to strings here, so every record entering the
//! store already has string examples.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::constants::{FILE_PATH_KEY, GUIDE_PATH_KEY, LAST_COMMIT_KEY};
use crate::core::{ConnGenError, RawRecord};
use crate::git;
use crate::pattern::PatternMatcher;
use crate::store::RecordStore;

/// Where and how to look for connection documents.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Environment directory, e.g. `connections/dev`
    pub directory: PathBuf,
    /// Glob relative to `directory`
    pub pattern: String,
    /// Look up `last_commit_at` with git
    pub git_timestamps: bool,
}

/// Parse one document into a raw record.
///
/// The document must be a YAML mapping with a string `id`.
pub fn parse_document(content: &str, path: &Path) -> Result<RawRecord, ConnGenError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConnGenError::DocumentParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let reason = match value.get("id") {
        _ if !value.is_mapping() => Some("expected a mapping at the top level"),
        Some(serde_yaml::Value::String(_)) => None,
        Some(_) => Some("`id` must be a string"),
        None => Some("missing `id`"),
    };
    if let Some(reason) = reason {
        return Err(ConnGenError::InvalidDocument {
            path: path.display().to_string(),
            reason: reason.to_string(),
        });
    }

    serde_yaml::from_value(value).map_err(|e| ConnGenError::DocumentParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Attach source information to a parsed record.
pub fn annotate(record: &mut RawRecord, path: &Path, last_commit_at: Option<String>) {
    record
        .attributes
        .insert(FILE_PATH_KEY.to_string(), Value::String(path.display().to_string()));

    if let Some(date) = last_commit_at {
        record.attributes.insert(LAST_COMMIT_KEY.to_string(), Value::String(date));
    }

    match record.attributes.get(GUIDE_PATH_KEY) {
        Some(Value::String(guide)) => {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            let resolved = base.join(guide).display().to_string();
            record.attributes.insert(GUIDE_PATH_KEY.to_string(), Value::String(resolved));
        }
        Some(other) => {
            warn!("Connection {} has a non-string guide_path ({other}); leaving it as is", record.id);
        }
        None => {}
    }

    record.normalize_examples();
}

/// Discover, parse and annotate every document under `options.directory`.
///
/// Documents are returned in sorted path order.
pub async fn load_records(options: &LoadOptions) -> Result<Vec<RawRecord>> {
    if !options.directory.is_dir() {
        return Err(ConnGenError::ConnectionsDirNotFound {
            path: options.directory.display().to_string(),
        }
        .into());
    }

    let matcher = PatternMatcher::new(&options.pattern)?;
    let documents = matcher.find_matches(&options.directory)?;

    let mut records = Vec::with_capacity(documents.len());
    for relative in documents {
        let path = options.directory.join(&relative);
        debug!("Loading connection from {}", path.display());

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read connection document {}", path.display()))?;
        let mut record = parse_document(&content, &path)?;

        let last_commit_at = if options.git_timestamps {
            git::last_commit_date(&path).await?
        } else {
            None
        };

        annotate(&mut record, &path, last_commit_at);
        records.push(record);
    }

    Ok(records)
}

/// Load every document into a fresh [`RecordStore`].
pub async fn load_store(options: &LoadOptions) -> Result<RecordStore> {
    let records = load_records(options).await?;
    let count = records.len();
    let store = RecordStore::from_records(records)?;
    info!("Loaded {count} connections from {}", options.directory.display());
    Ok(store)
}
