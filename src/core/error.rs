//! Error handling for conngen
//!
//! This module provides the error types and user-friendly error reporting for the
//! connection type generator. Two layers work together:
//! 1. [`ConnGenError`] - strongly-typed failures raised by loading and resolution
//! 2. [`ErrorContext`] - a wrapper adding a suggestion and details for CLI users
//!
//! # Error Categories
//!
//! - **Inheritance**: [`ConnGenError::MissingAncestor`], [`ConnGenError::CycleDetected`],
//!   [`ConnGenError::RecordNotFound`]
//! - **Parameters**: [`ConnGenError::MalformedParameter`]
//! - **Documents**: [`ConnGenError::DocumentParse`], [`ConnGenError::InvalidDocument`],
//!   [`ConnGenError::DuplicateId`], [`ConnGenError::ConnectionsDirNotFound`]
//! - **Git**: [`ConnGenError::GitNotFound`], [`ConnGenError::GitCommandError`]
//! - **Configuration**: [`ConnGenError::ConfigError`]
//!
//! Every resolution failure is a data-authoring defect. Nothing is retried and no
//! partial output is written; the CLI turns the error into an [`ErrorContext`] and
//! exits non-zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use conngen_cli::core::{ConnGenError, user_friendly_error};
//!
//! let error = ConnGenError::MissingAncestor {
//!     id: "snowflake_oauth".to_string(),
//!     parent: "snowflake".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for conngen operations
#[derive(Error, Debug)]
pub enum ConnGenError {
    /// A record's `inherit_from` names an id that is not in the store
    ///
    /// # Fields
    /// - `id`: The record declaring the inheritance
    /// - `parent`: The id it tried to inherit from
    #[error("Connection '{id}' inherits from '{parent}', which does not exist")]
    MissingAncestor {
        /// The record declaring the inheritance
        id: String,
        /// The missing parent id
        parent: String,
    },

    /// An `inherit_from` chain revisits a record that is still being resolved
    ///
    /// The chain repeats the revisited id at the end, e.g. `a -> b -> a`.
    #[error("Circular inheritance detected: {chain}")]
    CycleDetected {
        /// The record whose resolution closed the cycle
        id: String,
        /// Rendered chain of ids forming the cycle
        chain: String,
    },

    /// A parameter has no `airflow_param_name` while merging
    #[error("Malformed parameter in connection '{id}': {reason}")]
    MalformedParameter {
        /// The record whose merge step failed
        id: String,
        /// Which parameter was malformed
        reason: String,
    },

    /// Lookup of an id that was never loaded
    #[error("Connection '{id}' not found")]
    RecordNotFound {
        /// The id that was requested
        id: String,
    },

    /// Two documents declare the same id
    #[error("Duplicate connection id '{id}' in {first} and {second}")]
    DuplicateId {
        /// The duplicated id
        id: String,
        /// Where the id was first declared
        first: String,
        /// Where the id was declared again
        second: String,
    },

    /// A connection document is not valid YAML or does not fit the record shape
    #[error("Failed to parse connection document {path}: {reason}")]
    DocumentParse {
        /// Path to the document
        path: String,
        /// Parser message
        reason: String,
    },

    /// A connection document parsed but is not a record
    #[error("Invalid connection document {path}: {reason}")]
    InvalidDocument {
        /// Path to the document
        path: String,
        /// Why the document was rejected
        reason: String,
    },

    /// The environment directory holding the connection documents is missing
    #[error("Connections directory not found: {path}")]
    ConnectionsDirNotFound {
        /// The directory that was searched
        path: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Git operation failed during execution
    ///
    /// # Fields
    /// - `operation`: The git operation that failed (e.g., "log")
    /// - `stderr`: The error output from the git command
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`ConnGenError`] with an optional suggestion (what to do next) and
/// optional details (why it happened). [`ErrorContext::display`] prints all three
/// to stderr with color coding.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ConnGenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ConnGenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions for the user
///
/// Known [`ConnGenError`] variants get tailored suggestions. When the error was
/// wrapped with `anyhow` context on the way up, the full chain is kept in the
/// details so the failing file or phase is not lost.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain = format!("{error:#}");

    match error.downcast::<ConnGenError>() {
        Ok(conn_error) => {
            let top = conn_error.to_string();
            let ctx = create_error_context(conn_error);
            if chain != top && ctx.details.is_none() {
                ctx.with_details(chain)
            } else {
                ctx
            }
        }
        Err(error) => {
            if let Some(io_error) = error.downcast_ref::<std::io::Error>()
                && io_error.kind() == std::io::ErrorKind::PermissionDenied
            {
                return ErrorContext::new(ConnGenError::Other {
                    message: chain,
                })
                .with_suggestion("Check file ownership and permissions of the connections directory and output path");
            }

            ErrorContext::new(ConnGenError::Other {
                message: chain,
            })
        }
    }
}

fn create_error_context(error: ConnGenError) -> ErrorContext {
    match &error {
        ConnGenError::MissingAncestor {
            parent,
            ..
        } => {
            let suggestion = format!(
                "Check the spelling of 'inherit_from: {parent}' or add a connection with id '{parent}'"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Every id referenced through inherit_from must be defined in the same environment")
        }
        ConnGenError::CycleDetected {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove one of the inherit_from references so the chain ends at a connection without a parent"),
        ConnGenError::MalformedParameter {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give every parameter an 'airflow_param_name'"),
        ConnGenError::DuplicateId {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Connection ids must be unique within an environment; rename one of the documents' ids"),
        ConnGenError::DocumentParse {
            ..
        }
        | ConnGenError::InvalidDocument {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the YAML syntax and make sure the document is a mapping with a string 'id'"),
        ConnGenError::ConnectionsDirNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass the environment name that exists under the connections directory, or set --connections-dir"),
        ConnGenError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git or rerun with --no-git to skip last-commit timestamps"),
        ConnGenError::GitCommandError {
            stderr,
            ..
        } => {
            let details = stderr.trim().to_string();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Run inside a git checkout, or rerun with --no-git to skip last-commit timestamps")
        }
        ConnGenError::ConfigError {
            ..
        }
        | ConnGenError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check conngen.toml for typos in key names and values"),
        _ => ErrorContext::new(error),
    }
}
