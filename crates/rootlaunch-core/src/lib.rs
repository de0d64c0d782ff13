//! Core domain types and port definitions for rootlaunch.
//!
//! This crate holds everything that does not touch the operating system
//! directly: the identity and launch value types, the launcher and
//! download ports, helper path resolution, and the services built on top
//! of the ports. OS adapters live in `rootlaunch-runtime`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    HelperCommand, IdentityOverride, LaunchRequest, LaunchResult, ROOT_PERSONA_ID,
    extract_app_id, is_app_store_url,
};
pub use download::{DownloadError, DownloadEvent, DownloadId, DownloadRequest};
pub use paths::{HELPER_BINARY_NAME, HELPER_DIR_NAME, PathError, resolve_helper_path};
pub use ports::{
    ContentFetcherPort, CoreError, DownloadEventEmitterPort, LaunchError, NoopDownloadEmitter,
    PrivilegedLauncherPort, StreamKind,
};
pub use services::{BatchSummary, DownloadOrchestrator, HelperService};
pub use settings::{Settings, SettingsError, validate_settings};

// Silence unused dev-dependency warnings for crates only used by integration tests
#[cfg(test)]
use tempfile as _;
