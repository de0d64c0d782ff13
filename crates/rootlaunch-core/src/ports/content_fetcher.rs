//! Content fetcher port.
//!
//! The licensed content-delivery service and the device/account identity
//! it needs live outside the core. The orchestrator only sees this trait.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::download::{DownloadError, DownloadRequest};

/// Sink for byte-level progress while a fetch is running.
pub trait FetchProgress: Send + Sync {
    /// Report `downloaded` bytes so far out of `total`, when known.
    fn report(&self, downloaded: u64, total: Option<u64>);
}

/// Port for fetching one version of an application.
#[async_trait]
pub trait ContentFetcherPort: Send + Sync {
    /// Fetch the requested version and return where it was stored.
    async fn fetch(
        &self,
        request: DownloadRequest,
        progress: &dyn FetchProgress,
    ) -> Result<PathBuf, DownloadError>;
}
