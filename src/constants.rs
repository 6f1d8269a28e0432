//! Defaults shared across the generator.

use std::time::Duration;

/// Executable used for git subprocesses.
#[cfg(windows)]
pub const GIT_COMMAND: &str = "git.exe";

/// Executable used for git subprocesses.
#[cfg(not(windows))]
pub const GIT_COMMAND: &str = "git";

/// Upper bound for a single `git log` call.
pub const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Root directory holding one subdirectory per environment.
pub const DEFAULT_CONNECTIONS_DIR: &str = "connections";

/// Glob selecting connection documents inside an environment directory.
pub const DEFAULT_DOCUMENT_PATTERN: &str = "**/*.yml";

/// Output file name; `{environment}` is substituted.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "{environment}-connection-types-request-body.json";

/// Environment used when none is given on the command line.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Commit sha used when none is given on the command line.
pub const DEFAULT_SHA: &str = "test";

/// Project configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "conngen.toml";

/// Attribute recording the document a connection was loaded from.
pub const FILE_PATH_KEY: &str = "file_path";

/// Attribute recording the last commit date of the document.
pub const LAST_COMMIT_KEY: &str = "last_commit_at";

/// Attribute holding a guide path relative to the document.
pub const GUIDE_PATH_KEY: &str = "guide_path";
