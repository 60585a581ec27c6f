//! Error types for the depot server.

use std::path::PathBuf;
use thiserror::Error;

/// Depot-tree errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Depot root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Depot I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Per-change validation failures raised by `ChangeList::validate`.
///
/// The `Display` strings are the observable submit-failure messages and must
/// not be reworded. Paths are client-relative, as the submitter wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    #[error("Invalid add change: File {0} already exists")]
    AlreadyExists(String),

    #[error("Invalid {kind} change: File {path} has no content")]
    MissingContent { kind: &'static str, path: String },

    #[error("Invalid {kind} change: File {path} doesn't exists")]
    FileNotFound { kind: &'static str, path: String },

    #[error("Invalid delete change: File {0} has content")]
    UnexpectedContent(String),
}

/// Submit application failures.
///
/// `Validation` means the changelist was rejected as a whole and the depot
/// is untouched. `Tree` means validation passed but the depot rejected an
/// individual write; no rollback is attempted.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Validation(#[from] ChangeError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Errors from loading or validating server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
