//! Download orchestrator.
//!
//! Hands download requests to the content fetcher on background tasks and
//! reports their progress through the event emitter. The orchestrator is
//! an ordinary value: the composition root creates it, shares it through
//! `Arc`, and shuts it down explicitly.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::download::{DownloadError, DownloadEvent, DownloadId, DownloadRequest};
use crate::ports::{ContentFetcherPort, DownloadEventEmitterPort, FetchProgress};

/// Forwards fetcher progress as `DownloadProgress` events.
struct EmitterProgress {
    id: DownloadId,
    emitter: Arc<dyn DownloadEventEmitterPort>,
}

impl FetchProgress for EmitterProgress {
    fn report(&self, downloaded: u64, total: Option<u64>) {
        self.emitter.emit(DownloadEvent::DownloadProgress {
            id: self.id.clone(),
            downloaded,
            total,
        });
    }
}

/// Coordinator for application downloads.
pub struct DownloadOrchestrator {
    fetcher: Arc<dyn ContentFetcherPort>,
    emitter: Arc<dyn DownloadEventEmitterPort>,
    tasks: TaskTracker,
    cancel: CancellationToken,
}

impl DownloadOrchestrator {
    pub fn new(
        fetcher: Arc<dyn ContentFetcherPort>,
        emitter: Arc<dyn DownloadEventEmitterPort>,
    ) -> Self {
        Self {
            fetcher,
            emitter,
            tasks: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Start fetching `version_id` of `app_id` in the background.
    ///
    /// Returns immediately. The outcome arrives through the event emitter;
    /// requests made after shutdown, or outside a Tokio runtime, produce a
    /// `DownloadFailed` event instead of a task.
    pub fn request_download(&self, app_id: i64, version_id: i64) {
        let request = DownloadRequest::new(app_id, version_id);
        let id = request.id();

        if self.tasks.is_closed() {
            warn!(%id, "Download requested after shutdown");
            self.fail(id, &DownloadError::ShutDown);
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!(%id, "Download requested outside a Tokio runtime");
            self.fail(
                id,
                &DownloadError::unavailable("no async runtime to run the download on"),
            );
            return;
        };

        info!(%id, "Queueing download");
        let fetcher = Arc::clone(&self.fetcher);
        let emitter = Arc::clone(&self.emitter);
        let cancel = self.cancel.clone();

        self.tasks.spawn_on(
            async move {
                emitter.emit(DownloadEvent::DownloadStarted { id: id.clone() });
                let progress = EmitterProgress {
                    id: id.clone(),
                    emitter: Arc::clone(&emitter),
                };

                let outcome = tokio::select! {
                    result = fetcher.fetch(request, &progress) => result,
                    () = cancel.cancelled() => Err(DownloadError::Cancelled),
                };

                match outcome {
                    Ok(location) => {
                        info!(%id, location = %location.display(), "Download completed");
                        emitter.emit(DownloadEvent::DownloadCompleted { id, location });
                    }
                    Err(e) => {
                        warn!(%id, "Download failed: {e}");
                        emitter.emit(DownloadEvent::DownloadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                }
            },
            &handle,
        );
    }

    /// Number of downloads still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Stop accepting requests and wait for running downloads to finish.
    pub async fn shutdown(&self) {
        self.tasks.close();
        debug!(in_flight = self.tasks.len(), "Waiting for downloads to finish");
        self.tasks.wait().await;
    }

    /// Stop accepting requests, cancel running downloads and wait for them
    /// to report `DownloadFailed`.
    pub async fn shutdown_now(&self) {
        self.tasks.close();
        self.cancel.cancel();
        self.tasks.wait().await;
    }

    fn fail(&self, id: DownloadId, error: &DownloadError) {
        self.emitter.emit(DownloadEvent::DownloadFailed {
            id,
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::ports::ChannelDownloadEmitter;

    /// Fetcher that reports two progress steps and succeeds.
    struct SteppingFetcher;

    #[async_trait]
    impl ContentFetcherPort for SteppingFetcher {
        async fn fetch(
            &self,
            request: DownloadRequest,
            progress: &dyn FetchProgress,
        ) -> Result<PathBuf, DownloadError> {
            progress.report(512, Some(1024));
            progress.report(1024, Some(1024));
            Ok(PathBuf::from(format!("/tmp/{}.ipa", request.app_id)))
        }
    }

    /// Fetcher that never finishes unless cancelled.
    struct StalledFetcher;

    #[async_trait]
    impl ContentFetcherPort for StalledFetcher {
        async fn fetch(
            &self,
            _request: DownloadRequest,
            _progress: &dyn FetchProgress,
        ) -> Result<PathBuf, DownloadError> {
            std::future::pending().await
        }
    }

    struct RefusingFetcher;

    #[async_trait]
    impl ContentFetcherPort for RefusingFetcher {
        async fn fetch(
            &self,
            _request: DownloadRequest,
            _progress: &dyn FetchProgress,
        ) -> Result<PathBuf, DownloadError> {
            Err(DownloadError::LicenseRefused {
                message: "not purchased".into(),
            })
        }
    }

    fn orchestrator(
        fetcher: impl ContentFetcherPort + 'static,
    ) -> (DownloadOrchestrator, UnboundedReceiver<DownloadEvent>) {
        let (emitter, rx) = ChannelDownloadEmitter::channel();
        (
            DownloadOrchestrator::new(Arc::new(fetcher), Arc::new(emitter)),
            rx,
        )
    }

    fn drain(rx: &mut UnboundedReceiver<DownloadEvent>) -> Vec<DownloadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_download_emits_full_sequence() {
        let (orchestrator, mut rx) = orchestrator(SteppingFetcher);
        orchestrator.request_download(42, 7);
        orchestrator.shutdown().await;

        let id = DownloadId::new(42, 7);
        assert_eq!(
            drain(&mut rx),
            vec![
                DownloadEvent::DownloadStarted { id: id.clone() },
                DownloadEvent::DownloadProgress {
                    id: id.clone(),
                    downloaded: 512,
                    total: Some(1024),
                },
                DownloadEvent::DownloadProgress {
                    id: id.clone(),
                    downloaded: 1024,
                    total: Some(1024),
                },
                DownloadEvent::DownloadCompleted {
                    id,
                    location: PathBuf::from("/tmp/42.ipa"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_error_becomes_failed_event() {
        let (orchestrator, mut rx) = orchestrator(RefusingFetcher);
        orchestrator.request_download(1, 2);
        orchestrator.shutdown().await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        match &events[1] {
            DownloadEvent::DownloadFailed { error, .. } => {
                assert!(error.contains("not purchased"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_requests_after_shutdown_are_rejected() {
        let (orchestrator, mut rx) = orchestrator(SteppingFetcher);
        orchestrator.shutdown().await;
        orchestrator.request_download(1, 2);

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![DownloadEvent::DownloadFailed {
                id: DownloadId::new(1, 2),
                error: DownloadError::ShutDown.to_string(),
            }]
        );
        assert_eq!(orchestrator.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_now_cancels_stalled_fetch() {
        let (orchestrator, mut rx) = orchestrator(StalledFetcher);
        orchestrator.request_download(5, 6);
        tokio::task::yield_now().await;

        tokio::time::timeout(std::time::Duration::from_secs(5), orchestrator.shutdown_now())
            .await
            .expect("shutdown_now should not hang");

        let events = drain(&mut rx);
        assert_eq!(
            events.last(),
            Some(&DownloadEvent::DownloadFailed {
                id: DownloadId::new(5, 6),
                error: DownloadError::Cancelled.to_string(),
            })
        );
    }

    #[test]
    fn test_request_outside_runtime_fails_without_panicking() {
        let (orchestrator, mut rx) = orchestrator(SteppingFetcher);
        orchestrator.request_download(1, 1);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_terminal());
    }
}
