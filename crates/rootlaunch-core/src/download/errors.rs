//! Download error types.
//!
//! These errors are serializable so they can travel inside download
//! events. Fetchers fold transport details into the message strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for download operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// The service refused to license the requested version to this account.
    #[error("License refused: {message}")]
    LicenseRefused { message: String },

    /// No content-delivery service is available in this process.
    #[error("Content service unavailable: {message}")]
    Unavailable { message: String },

    /// The orchestrator was shut down before the request was accepted.
    #[error("Download orchestrator is shut down")]
    ShutDown,

    /// The fetch was cancelled during shutdown.
    #[error("Download cancelled")]
    Cancelled,
}

impl DownloadError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
