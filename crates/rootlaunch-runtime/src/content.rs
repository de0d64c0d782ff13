//! Content fetcher used when no content-delivery service is linked in.

use std::path::PathBuf;

use async_trait::async_trait;
use rootlaunch_core::ports::FetchProgress;
use rootlaunch_core::{ContentFetcherPort, DownloadError, DownloadRequest};
use tracing::debug;

/// Fetcher that refuses every request.
///
/// Fetching licensed content needs an account session and a device
/// identity that this build does not carry, so every request fails with
/// [`DownloadError::Unavailable`] and the orchestrator reports it as a
/// `DownloadFailed` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableContentFetcher;

#[async_trait]
impl ContentFetcherPort for UnavailableContentFetcher {
    async fn fetch(
        &self,
        request: DownloadRequest,
        _progress: &dyn FetchProgress,
    ) -> Result<PathBuf, DownloadError> {
        debug!(id = %request.id(), "No content service configured");
        Err(DownloadError::unavailable(
            "this build has no content-delivery service",
        ))
    }
}
