//! Configuration for the generator
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults (see [`crate::constants`])
//! 2. `conngen.toml`: the file given by `--config` / `CONNGEN_CONFIG`, otherwise
//!    `./conngen.toml` when it exists
//! 3. Command-line flags
//!
//! ```toml
//! connections_dir = "connections"
//! pattern = "**/*.yml"
//! output = "{environment}-connection-types-request-body.json"
//! git_timestamps = true
//! ```

mod generator;

pub use generator::GeneratorConfig;
