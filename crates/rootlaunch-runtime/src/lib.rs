//! OS adapters for rootlaunch.
//!
//! The launcher in this crate implements
//! [`rootlaunch_core::PrivilegedLauncherPort`] on top of `posix_spawn`:
//!
//! 1. build the identity override attributes (persona, UID, GID)
//! 2. create close-on-exec pipes for stdout and stderr
//! 3. spawn the child with its stdout/stderr redirected into the pipes
//! 4. drain both pipes concurrently, then reap the child
//!
//! Only the `ffi` module contains `unsafe` code.

#![deny(unused_crate_dependencies)]

pub mod content;

#[cfg(unix)]
#[allow(unsafe_code)]
mod ffi;
#[cfg(unix)]
pub mod identity;
#[cfg(unix)]
pub mod launcher;
#[cfg(unix)]
mod pipes;

pub use content::UnavailableContentFetcher;
#[cfg(unix)]
pub use identity::{InheritedIdentity, PersonaIdentity, SpawnIdentity, build_identity_attributes};
#[cfg(unix)]
pub use launcher::{InheritedLauncher, RootLauncher, SpawnLauncher};

// Only used by integration tests
#[cfg(test)]
use tempfile as _;
