//! Download events - discriminated union for all download state changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::DownloadId;

/// Single discriminated union for all download events.
///
/// Serialized with a `type` tag:
///
/// ```json
/// { "type": "download_progress", "id": "544007664:862345121", "downloaded": 1024, "total": 4096 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    /// The fetch workflow has been handed the request.
    DownloadStarted { id: DownloadId },

    /// Bytes received so far.
    DownloadProgress {
        id: DownloadId,
        downloaded: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },

    /// The content was fetched and stored at `location`.
    DownloadCompleted { id: DownloadId, location: PathBuf },

    /// The fetch failed or was rejected.
    DownloadFailed { id: DownloadId, error: String },
}

impl DownloadEvent {
    /// The download this event belongs to.
    pub const fn id(&self) -> &DownloadId {
        match self {
            Self::DownloadStarted { id }
            | Self::DownloadProgress { id, .. }
            | Self::DownloadCompleted { id, .. }
            | Self::DownloadFailed { id, .. } => id,
        }
    }

    /// Whether no further events follow for this download.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DownloadCompleted { .. } | Self::DownloadFailed { .. }
        )
    }
}
