//! Error types for tend
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid configuration)
//! - 3: Malformed vault content (document grammar, task schema)
//! - 4: Operation failed (I/O, serialization, failed run)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tend CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const MALFORMED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tend operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Document grammar errors (exit code 3)
    #[error("Invalid document: whitespace before frontmatter")]
    WhitespaceBeforeFrontmatter,

    #[error("Invalid document: incorrect frontmatter marker")]
    InvalidMarker,

    #[error("Invalid document: content before frontmatter")]
    ContentBeforeFrontmatter,

    #[error("Invalid document: unclosed frontmatter block")]
    UnclosedFrontmatter,

    #[error("Invalid document: multiple frontmatter blocks")]
    MultipleFrontmatterBlocks,

    #[error("Invalid frontmatter YAML: {0}")]
    InvalidFrontmatter(#[source] serde_yaml::Error),

    // Task schema errors (exit code 3)
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Task '{0}' is done but has no completed_at timestamp")]
    InconsistentCompletion(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File {name} not found in {dir}")]
    FileNotFound { name: String, dir: PathBuf },

    #[error("YAML serialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Modifier {name} (step {index}) failed: {source}")]
    ModifierFailed {
        index: usize,
        name: &'static str,
        source: Box<Error>,
    },

    #[error("{path}: {source}")]
    FileProcessing { path: PathBuf, source: Box<Error> },

    #[error("Run failed: {0} file(s) could not be processed")]
    RunFailed(usize),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_) | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Malformed vault content
            Error::WhitespaceBeforeFrontmatter
            | Error::InvalidMarker
            | Error::ContentBeforeFrontmatter
            | Error::UnclosedFrontmatter
            | Error::MultipleFrontmatterBlocks
            | Error::InvalidFrontmatter(_)
            | Error::MissingField(_)
            | Error::InconsistentCompletion(_) => exit_codes::MALFORMED,

            // Wrapped errors classify by their cause
            Error::ModifierFailed { source, .. } | Error::FileProcessing { source, .. } => {
                source.exit_code()
            }

            // Operation failures
            Error::Io(_)
            | Error::ReadDir { .. }
            | Error::FileNotFound { .. }
            | Error::Yaml(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::RunFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Coarse classification used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) | Error::InvalidArgument(_) => "user",

            Error::WhitespaceBeforeFrontmatter
            | Error::InvalidMarker
            | Error::ContentBeforeFrontmatter
            | Error::UnclosedFrontmatter
            | Error::MultipleFrontmatterBlocks
            | Error::InvalidFrontmatter(_) => "grammar",

            Error::MissingField(_) | Error::InconsistentCompletion(_) => "schema",

            Error::ModifierFailed { source, .. } | Error::FileProcessing { source, .. } => {
                source.kind()
            }

            _ => "operation",
        }
    }
}

/// Result type alias for tend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    pub kind: &'static str,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
        }
    }
}
