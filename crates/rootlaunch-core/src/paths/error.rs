//! Path-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The OS could not tell us where the running executable lives.
    #[error("Cannot determine current executable path: {0}")]
    CurrentExe(String),

    /// The executable path has no containing directory.
    #[error("Executable path {0} has no parent directory")]
    NoParentDir(PathBuf),

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,
}
