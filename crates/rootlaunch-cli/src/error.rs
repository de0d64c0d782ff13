//! CLI-specific error types and mappings.
//!
//! Maps core and launch errors to exit codes and user-facing messages.

use rootlaunch_core::{CoreError, LaunchError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The child could not be launched or observed.
    #[error("Launch error: {0}")]
    Launch(String),

    /// No service could satisfy the request (download failures).
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error (anything not mapped to a `CliError`)
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Launch(_) => 71,      // EX_OSERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<LaunchError> for CliError {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::InvalidRequest(msg) => Self::Arguments(msg),
            LaunchError::PathResolution(path_err) => Self::Config(path_err.to_string()),
            other => Self::Launch(other.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Launch(launch_err) => launch_err.into(),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rootlaunch_core::{PathError, SettingsError};

    use super::*;

    #[test]
    fn test_spawn_failure_is_os_error() {
        let err: CliError = LaunchError::Spawn {
            path: PathBuf::from("/missing"),
            code: 2,
        }
        .into();
        assert_eq!(err.exit_code(), 71);
        assert!(err.to_string().contains("/missing"));
    }

    #[test]
    fn test_invalid_request_is_usage_error() {
        let err: CliError = LaunchError::InvalidRequest("empty".into()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_helper_resolution_is_config_error() {
        let err: CliError = CoreError::Launch(PathError::EmptyPath.into()).into();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_settings_error_is_config_error() {
        let err: CliError = CoreError::Settings(SettingsError::ReservedPersona).into();
        assert_eq!(err.exit_code(), 78);
    }
}
