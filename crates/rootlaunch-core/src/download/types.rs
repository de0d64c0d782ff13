//! Download request and identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical identifier of a download: `app_id:version_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(String);

impl DownloadId {
    pub fn new(app_id: i64, version_id: i64) -> Self {
        Self(format!("{app_id}:{version_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request to fetch one version of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Store identifier of the application.
    pub app_id: i64,
    /// Store identifier of the application version (external version id).
    pub version_id: i64,
}

impl DownloadRequest {
    pub const fn new(app_id: i64, version_id: i64) -> Self {
        Self { app_id, version_id }
    }

    pub fn id(&self) -> DownloadId {
        DownloadId::new(self.app_id, self.version_id)
    }
}
