//! Path utilities for locating the root helper binary.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Resolution is a pure function of the running executable's location;
//!   the helper's existence is checked by the OS at spawn time, not here

mod error;
mod helper;

// Error type
pub use error::PathError;

// Helper binary location
pub use helper::{HELPER_BINARY_NAME, HELPER_DIR_NAME, helper_path_for_exe, resolve_helper_path};
