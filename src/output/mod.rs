//! The request body published to the connection types API.
//!
//! ```json
//! {
//!     "ref": "<commit sha>",
//!     "connectionTypes": [ { "id": "...", "airflowParamName": "...", ... } ]
//! }
//! ```
//!
//! Documents are authored in snake_case; the API expects camelCase, so every key
//! in the body is converted with [`camel::camelize`] right before serialization.
//! The body is written with four-space indentation through an atomic rename.

pub mod camel;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tracing::info;

use crate::core::ConnectionType;
use crate::utils::atomic_write;

/// Top-level body sent to the API.
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    /// Commit sha the connections were generated from (named `ref` by the API).
    #[serde(rename = "ref")]
    pub reference: &'a str,
    pub connection_types: Vec<&'a ConnectionType>,
}

impl<'a> RequestBody<'a> {
    pub fn new(reference: &'a str, connection_types: Vec<&'a ConnectionType>) -> Self {
        Self {
            reference,
            connection_types,
        }
    }

    /// The body as a camelCased JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        let value = serde_json::to_value(self).context("Failed to serialize request body")?;
        Ok(camel::camelize(value))
    }

    /// The body rendered with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let value = self.to_value()?;
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer).context("Failed to render request body")?;
        String::from_utf8(buffer).context("Request body is not valid UTF-8")
    }

    /// Render and atomically write the body to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        info!("Writing connections request body to {}", path.display());
        atomic_write(path, json.as_bytes())
            .with_context(|| format!("Failed to write request body to {}", path.display()))
    }
}
