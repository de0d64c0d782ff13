//! Download event emitter port.
//!
//! This port abstracts download event emission, allowing the orchestrator
//! to report progress without coupling to the transport that carries it.

use tokio::sync::mpsc;

use crate::download::DownloadEvent;

/// Port for emitting download events.
///
/// Implementations handle the actual event delivery. `emit` must not block.
pub trait DownloadEventEmitterPort: Send + Sync {
    /// Emit a download event.
    fn emit(&self, event: DownloadEvent);

    /// Clone this emitter into a boxed trait object.
    ///
    /// This enables cloning of `Arc<dyn DownloadEventEmitterPort>` without
    /// requiring the underlying type to implement Clone.
    fn clone_box(&self) -> Box<dyn DownloadEventEmitterPort>;
}

/// A no-op download event emitter for tests and fire-and-forget callers.
#[derive(Debug, Clone, Default)]
pub struct NoopDownloadEmitter;

impl NoopDownloadEmitter {
    /// Create a new no-op download emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DownloadEventEmitterPort for NoopDownloadEmitter {
    fn emit(&self, _event: DownloadEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn DownloadEventEmitterPort> {
        Box::new(self.clone())
    }
}

/// Emitter that forwards events into an unbounded channel.
///
/// Events emitted after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelDownloadEmitter {
    tx: mpsc::UnboundedSender<DownloadEvent>,
}

impl ChannelDownloadEmitter {
    /// Create an emitter and the receiving half of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DownloadEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DownloadEventEmitterPort for ChannelDownloadEmitter {
    fn emit(&self, event: DownloadEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("download event receiver dropped");
        }
    }

    fn clone_box(&self) -> Box<dyn DownloadEventEmitterPort> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::download::DownloadId;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopDownloadEmitter::new();

        // Should not panic
        emitter.emit(DownloadEvent::DownloadStarted {
            id: DownloadId::new(1, 1),
        });
    }

    #[test]
    fn test_noop_emitter_clone_box() {
        let emitter = NoopDownloadEmitter::new();
        let _boxed: Box<dyn DownloadEventEmitterPort> = emitter.clone_box();
    }

    #[test]
    fn test_channel_emitter_delivers_in_order() {
        let (emitter, mut rx) = ChannelDownloadEmitter::channel();
        let emitter: Arc<dyn DownloadEventEmitterPort> = Arc::new(emitter);
        let id = DownloadId::new(7, 8);

        emitter.emit(DownloadEvent::DownloadStarted { id: id.clone() });
        emitter.clone_box().emit(DownloadEvent::DownloadFailed {
            id: id.clone(),
            error: "nope".into(),
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            DownloadEvent::DownloadStarted { id: id.clone() }
        );
        assert!(rx.try_recv().unwrap().is_terminal());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_emitter_ignores_dropped_receiver() {
        let (emitter, rx) = ChannelDownloadEmitter::channel();
        drop(rx);
        emitter.emit(DownloadEvent::DownloadStarted {
            id: DownloadId::new(1, 2),
        });
    }
}
