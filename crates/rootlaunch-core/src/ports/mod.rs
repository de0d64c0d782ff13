//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No file descriptors, `posix_spawnattr_t` or other OS handles in any signature
//! - The launcher port expresses intent (run this elevated), not mechanism
//! - Collaborators outside the core (content delivery, event transport) are
//!   reached only through these traits

pub mod content_fetcher;
pub mod download_event_emitter;
pub mod launcher;

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;
use crate::settings::SettingsError;

pub use content_fetcher::{ContentFetcherPort, FetchProgress};
pub use download_event_emitter::{
    ChannelDownloadEmitter, DownloadEventEmitterPort, NoopDownloadEmitter,
};
pub use launcher::PrivilegedLauncherPort;

/// Which of the child's output streams an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn os_message(code: &i32) -> String {
    io::Error::from_raw_os_error(*code).to_string()
}

/// Errors from an elevated launch.
///
/// Every variant is fatal to the launch attempt and none is retried. A
/// child that runs and exits non-zero is not an error; see
/// [`crate::LaunchResult::exit_status`].
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The request could not be handed to the OS (empty path, NUL bytes).
    #[error("Invalid launch request: {0}")]
    InvalidRequest(String),

    /// A spawn-attribute call failed while building the identity override.
    #[error("Identity attribute setup failed: {call} returned {code}")]
    AttributeConfiguration { call: &'static str, code: i32 },

    /// The helper location could not be computed.
    #[error(transparent)]
    PathResolution(#[from] PathError),

    /// Creating an output pipe failed; nothing was spawned.
    #[error("Failed to create {stream} pipe: {}", os_message(.code))]
    Pipe { stream: StreamKind, code: i32 },

    /// The OS refused to create the process.
    #[error("Failed to spawn {}: {}", .path.display(), os_message(.code))]
    Spawn { path: PathBuf, code: i32 },

    /// Reading one of the child's streams failed. The child was reaped.
    #[error("Failed to read child {stream}: {message}")]
    Drain { stream: StreamKind, message: String },

    /// Waiting for the child failed.
    #[error("Failed to wait for child {pid}: {}", os_message(.code))]
    Wait { pid: i32, code: i32 },
}

impl LaunchError {
    /// OS error code carried by the error, if any.
    pub const fn os_error_code(&self) -> Option<i32> {
        match self {
            Self::AttributeConfiguration { code, .. }
            | Self::Pipe { code, .. }
            | Self::Spawn { code, .. }
            | Self::Wait { code, .. } => Some(*code),
            Self::InvalidRequest(_) | Self::PathResolution(_) | Self::Drain { .. } => None,
        }
    }

    /// Short name of the step that failed, for logs and exit codes.
    pub const fn step(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "validate",
            Self::AttributeConfiguration { .. } => "identity",
            Self::PathResolution(_) => "resolve_helper",
            Self::Pipe { .. } => "pipe",
            Self::Spawn { .. } => "spawn",
            Self::Drain { .. } => "drain",
            Self::Wait { .. } => "wait",
        }
    }
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own representation (CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Launch operation failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_carries_os_code() {
        let err = LaunchError::Spawn {
            path: PathBuf::from("/nonexistent/tool"),
            code: 2,
        };
        assert_eq!(err.os_error_code(), Some(2));
        assert_eq!(err.step(), "spawn");
        assert!(err.to_string().starts_with("Failed to spawn /nonexistent/tool"));
    }

    #[test]
    fn test_attribute_error_names_call() {
        let err = LaunchError::AttributeConfiguration {
            call: "posix_spawnattr_set_persona_uid_np",
            code: 22,
        };
        assert_eq!(
            err.to_string(),
            "Identity attribute setup failed: posix_spawnattr_set_persona_uid_np returned 22"
        );
    }

    #[test]
    fn test_path_error_converts_into_launch_error() {
        let err: LaunchError = PathError::CurrentExe("gone".into()).into();
        assert!(matches!(err, LaunchError::PathResolution(_)));
        assert_eq!(err.os_error_code(), None);
    }

    #[test]
    fn test_pipe_error_mentions_stream() {
        let err = LaunchError::Pipe {
            stream: StreamKind::Stderr,
            code: 24,
        };
        assert!(err.to_string().contains("stderr pipe"));
    }
}
