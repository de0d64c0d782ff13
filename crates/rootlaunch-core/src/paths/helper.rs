//! Root helper binary resolution.
//!
//! The helper ships next to the main executable:
//!
//! ```text
//! <bundle>/rootlaunch
//! <bundle>/helpers/roothelper
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use super::error::PathError;

/// Directory next to the executable that holds helper binaries.
pub const HELPER_DIR_NAME: &str = "helpers";

/// File name of the root helper binary.
pub const HELPER_BINARY_NAME: &str = "roothelper";

static HELPER_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Compute the helper path for an executable located at `exe`.
pub fn helper_path_for_exe(exe: &Path) -> Result<PathBuf, PathError> {
    if exe.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }
    let dir = exe
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| PathError::NoParentDir(exe.to_path_buf()))?;

    Ok(dir.join(HELPER_DIR_NAME).join(HELPER_BINARY_NAME))
}

/// Get the path to the root helper for the running process.
///
/// The bundle does not move while we run, so the first successful
/// resolution is cached and returned by every later call.
pub fn resolve_helper_path() -> Result<PathBuf, PathError> {
    if let Some(path) = HELPER_PATH.get() {
        return Ok(path.clone());
    }

    let exe = env::current_exe().map_err(|e| PathError::CurrentExe(e.to_string()))?;
    let exe = match exe.canonicalize() {
        Ok(resolved) => resolved,
        Err(e) => {
            debug!(exe = %exe.display(), "Could not canonicalize executable path: {e}");
            exe
        }
    };

    let path = helper_path_for_exe(&exe)?;
    debug!(helper = %path.display(), "Resolved root helper path");
    Ok(HELPER_PATH.get_or_init(|| path).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_helper_path_is_adjacent_to_executable() {
        let bundle = TempDir::new().unwrap();
        let exe = bundle.path().join("rootlaunch");

        let helper = helper_path_for_exe(&exe).unwrap();
        assert_eq!(
            helper,
            bundle.path().join(HELPER_DIR_NAME).join(HELPER_BINARY_NAME)
        );
    }

    #[test]
    fn test_helper_path_does_not_require_existence() {
        let exe = PathBuf::from("/nonexistent/bundle/rootlaunch");
        let helper = helper_path_for_exe(&exe).unwrap();
        assert_eq!(
            helper,
            PathBuf::from("/nonexistent/bundle/helpers/roothelper")
        );
    }

    #[test]
    fn test_bare_file_name_has_no_parent() {
        let err = helper_path_for_exe(Path::new("rootlaunch")).unwrap_err();
        assert_eq!(err, PathError::NoParentDir(PathBuf::from("rootlaunch")));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert_eq!(
            helper_path_for_exe(Path::new("")).unwrap_err(),
            PathError::EmptyPath
        );
    }

    #[test]
    fn test_resolve_helper_path_is_deterministic() {
        let first = resolve_helper_path().unwrap();
        let second = resolve_helper_path().unwrap();
        assert_eq!(first, second);
        assert!(first.is_absolute());
        assert!(first.ends_with(Path::new(HELPER_DIR_NAME).join(HELPER_BINARY_NAME)));
    }
}
