//! conngen - connection type aggregator
//!
//! Connection types are authored as one YAML document per type under
//! `connections/<environment>/`. A document may extend another with
//! `inherit_from`, and may add to or override the inherited parameter list with
//! `+parameters`. conngen loads every document for an environment, resolves
//! those chains, drops connections marked `visible: false`, and writes a single
//! camelCase JSON request body for the connection types API.
//!
//! # Pipeline
//!
//! 1. [`loader`] finds documents with [`pattern`], parses them and annotates each
//!    record with its file path and (optionally) its last commit date via [`git`]
//! 2. [`store`] indexes records by id, rejecting duplicates
//! 3. [`resolver`] resolves every record against its ancestors, merging
//!    parameters and rejecting cycles and missing ancestors
//! 4. [`resolver::filter`] keeps visible records
//! 5. [`output`] renders the request body and writes it atomically
//!
//! # Document Example
//!
//! ```yaml
//! id: aws_s3
//! inherit_from: aws
//! display_name: Amazon S3
//! +parameters:
//!   - airflow_param_name: region_name
//!     is_in_extra: true
//!     example: eu-west-1
//! ```
//!
//! # Modules
//!
//! - [`cli`] - `generate` and `validate` commands
//! - [`config`] - `conngen.toml` settings
//! - [`core`] - record types and errors
//! - [`utils`] - filesystem helpers

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod git;
pub mod loader;
pub mod output;
pub mod pattern;
pub mod resolver;
pub mod store;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
