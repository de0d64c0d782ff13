//! Launch request and result types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ports::LaunchError;

/// Request to run an executable with elevated identity.
///
/// The program path is passed to the child as `argv[0]`; `args` holds
/// only what follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    executable_path: PathBuf,
    args: Vec<String>,
}

impl LaunchRequest {
    /// Create a validated launch request.
    ///
    /// Rejects an empty path and any path or argument containing a NUL
    /// byte, since neither can be handed to the OS. Whether the path
    /// points at an executable is left to the spawn call.
    pub fn new<I, S>(executable_path: impl Into<PathBuf>, args: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let executable_path = executable_path.into();
        if executable_path.as_os_str().is_empty() {
            return Err(LaunchError::InvalidRequest(
                "executable path must not be empty".into(),
            ));
        }
        if executable_path.to_string_lossy().contains('\0') {
            return Err(LaunchError::InvalidRequest(format!(
                "executable path contains a NUL byte: {}",
                executable_path.display()
            )));
        }

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if let Some(position) = args.iter().position(|arg| arg.contains('\0')) {
            return Err(LaunchError::InvalidRequest(format!(
                "argument {position} contains a NUL byte"
            )));
        }

        Ok(Self {
            executable_path,
            args,
        })
    }

    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Outcome of a completed launch.
///
/// A non-zero exit status is data, not a failure: callers decide what a
/// given status means for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    exit_status: i32,
    standard_output: String,
    standard_error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<i32>,
}

impl LaunchResult {
    /// Result of a child that exited normally.
    pub fn new(
        exit_status: i32,
        standard_output: impl Into<String>,
        standard_error: impl Into<String>,
    ) -> Self {
        Self {
            exit_status,
            standard_output: standard_output.into(),
            standard_error: standard_error.into(),
            signal: None,
        }
    }

    /// Result of a child terminated by `signal`.
    ///
    /// The exit status follows the shell convention of `128 + signal`.
    pub fn signaled(
        signal: i32,
        standard_output: impl Into<String>,
        standard_error: impl Into<String>,
    ) -> Self {
        Self {
            exit_status: 128 + signal,
            standard_output: standard_output.into(),
            standard_error: standard_error.into(),
            signal: Some(signal),
        }
    }

    pub const fn exit_status(&self) -> i32 {
        self.exit_status
    }

    pub fn standard_output(&self) -> &str {
        &self.standard_output
    }

    pub fn standard_error(&self) -> &str {
        &self.standard_error
    }

    /// Signal that terminated the child, if any.
    pub const fn signal(&self) -> Option<i32> {
        self.signal
    }

    /// Exited normally with status 0.
    pub const fn success(&self) -> bool {
        self.exit_status == 0 && self.signal.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_args_in_order() {
        let request = LaunchRequest::new("/usr/bin/env", ["a", "b", "c"]).unwrap();
        assert_eq!(request.executable_path(), Path::new("/usr/bin/env"));
        assert_eq!(request.args(), ["a", "b", "c"]);
    }

    #[test]
    fn test_request_rejects_empty_path() {
        let err = LaunchRequest::new("", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidRequest(_)));
    }

    #[test]
    fn test_request_rejects_nul_in_argument() {
        let err = LaunchRequest::new("/bin/echo", ["ok", "bad\0arg"]).unwrap_err();
        match err {
            LaunchError::InvalidRequest(msg) => assert!(msg.contains("argument 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_signaled_result_uses_shell_convention() {
        let result = LaunchResult::signaled(9, "", "killed");
        assert_eq!(result.exit_status(), 137);
        assert_eq!(result.signal(), Some(9));
        assert!(!result.success());
    }

    #[test]
    fn test_non_zero_exit_is_not_success() {
        let result = LaunchResult::new(42, "out", "err");
        assert_eq!(result.exit_status(), 42);
        assert_eq!(result.standard_output(), "out");
        assert_eq!(result.standard_error(), "err");
        assert!(!result.success());
    }
}
