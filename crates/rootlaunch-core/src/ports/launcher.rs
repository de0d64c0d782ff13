//! Privileged launcher port.
//!
//! Runs an executable under an overridden identity and hands back both
//! captured output streams together with the exit status.

use crate::domain::{LaunchRequest, LaunchResult};

use super::LaunchError;

/// Launcher for running executables with elevated identity.
///
/// Calls are synchronous: they return only after the child has exited.
/// Implementations keep no state between calls, so one launcher can be
/// shared across threads and invoked concurrently.
pub trait PrivilegedLauncherPort: Send + Sync {
    /// Run `request` elevated and capture its output.
    ///
    /// A non-zero exit status is returned inside the `LaunchResult`.
    fn run_elevated(&self, request: &LaunchRequest) -> Result<LaunchResult, LaunchError>;
}
