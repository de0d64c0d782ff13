//! posix_spawn-based implementation of the privileged launcher port.

use std::ffi::CString;
use std::os::fd::AsFd;
use std::os::unix::ffi::OsStrExt;
use std::time::Instant;

use nix::errno::Errno;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::Pid;
use rootlaunch_core::{
    LaunchError, LaunchRequest, LaunchResult, PrivilegedLauncherPort, StreamKind,
};
use tracing::{debug, info, warn};

#[cfg(target_vendor = "apple")]
use crate::ffi::SpawnAttributes;
use crate::ffi::{self, CStringArray, FileActions};
use crate::identity::{InheritedIdentity, PersonaIdentity, SpawnIdentity};
use crate::pipes::{DrainedOutput, OutputPipe, drain};

/// Launcher that spawns children with `posix_spawn` and captures their
/// stdout and stderr through two pipes.
///
/// The identity policy `I` decides which spawn attributes each launch
/// carries. Each call builds its own attributes, pipes and argument
/// arrays; nothing is shared between calls.
#[derive(Debug, Clone, Default)]
pub struct SpawnLauncher<I> {
    identity: I,
}

/// Launcher that runs children as root through the persona override.
pub type RootLauncher = SpawnLauncher<PersonaIdentity>;

/// Launcher that runs children with the caller's identity.
pub type InheritedLauncher = SpawnLauncher<InheritedIdentity>;

impl<I: SpawnIdentity> SpawnLauncher<I> {
    pub const fn new(identity: I) -> Self {
        Self { identity }
    }

    pub const fn identity(&self) -> &I {
        &self.identity
    }
}

impl RootLauncher {
    /// Launcher targeting the root persona.
    pub const fn root() -> Self {
        Self::new(PersonaIdentity::root())
    }
}

impl<I: SpawnIdentity> PrivilegedLauncherPort for SpawnLauncher<I> {
    fn run_elevated(&self, request: &LaunchRequest) -> Result<LaunchResult, LaunchError> {
        let path = request.executable_path();
        let started = Instant::now();

        // Attributes first: an identity failure must not leave pipes behind.
        let attributes = self.identity.attributes()?;
        #[cfg(target_vendor = "apple")]
        let attributes = Some(close_unlisted_descriptors(attributes)?);

        let program = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| LaunchError::InvalidRequest(e.to_string()))?;
        let argv = build_argv(&program, request.args())?;
        let envp = build_envp();

        let stdout_pipe = OutputPipe::new(StreamKind::Stdout)?;
        let stderr_pipe = OutputPipe::new(StreamKind::Stderr)?;

        let spawn_failed = |code: i32| LaunchError::Spawn {
            path: path.to_path_buf(),
            code,
        };
        let mut actions = FileActions::new().map_err(spawn_failed)?;
        actions
            .add_dup2(stdout_pipe.write.as_fd(), libc::STDOUT_FILENO)
            .map_err(spawn_failed)?;
        actions
            .add_dup2(stderr_pipe.write.as_fd(), libc::STDERR_FILENO)
            .map_err(spawn_failed)?;
        #[cfg(target_vendor = "apple")]
        actions
            .add_inherit(libc::STDIN_FILENO)
            .map_err(spawn_failed)?;

        info!(
            path = %path.display(),
            args = request.args().len(),
            identity = %self.identity.describe(),
            "Spawning process"
        );
        let pid = ffi::spawn(&program, &actions, attributes.as_ref(), &argv, &envp)
            .map_err(|code| {
                warn!(path = %path.display(), code, "posix_spawn failed");
                spawn_failed(code)
            })?;
        drop(actions);
        drop(attributes);

        // Only the child may hold the write ends now, so EOF marks its exit.
        drop(stdout_pipe.write);
        drop(stderr_pipe.write);

        let drained = drain(stdout_pipe.read, stderr_pipe.read);
        // Reap even when draining failed so no zombie is left behind.
        let status = wait_for_exit(pid)?;
        let DrainedOutput { stdout, stderr } = drained?;

        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        let result = match status {
            ChildExit::Code(code) => LaunchResult::new(code, stdout, stderr),
            ChildExit::Signal(signal) => LaunchResult::signaled(signal, stdout, stderr),
        };

        debug!(
            pid,
            exit_status = result.exit_status(),
            stdout_bytes = result.standard_output().len(),
            stderr_bytes = result.standard_error().len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Process finished"
        );
        Ok(result)
    }
}

/// Make the child start with only the descriptors its file actions name.
///
/// Pipes created by concurrent launches may still be inheritable for a
/// moment (see `pipes::cloexec_pipe`). The persona calls do not touch the
/// spawn flags.
#[cfg(target_vendor = "apple")]
fn close_unlisted_descriptors(
    attributes: Option<SpawnAttributes>,
) -> Result<SpawnAttributes, LaunchError> {
    let fail =
        |call: &'static str| move |code: i32| LaunchError::AttributeConfiguration { call, code };

    let mut attributes = match attributes {
        Some(attributes) => attributes,
        None => SpawnAttributes::new().map_err(fail("posix_spawnattr_init"))?,
    };
    attributes
        .set_flags(ffi::POSIX_SPAWN_CLOEXEC_DEFAULT)
        .map_err(fail("posix_spawnattr_setflags"))?;
    Ok(attributes)
}

/// How the child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildExit {
    Code(i32),
    Signal(i32),
}

/// Block until `pid` exits or is killed.
fn wait_for_exit(pid: libc::pid_t) -> Result<ChildExit, LaunchError> {
    loop {
        match waitpid(Pid::from_raw(pid), None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ChildExit::Code(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(ChildExit::Signal(signal as i32)),
            // Stop/continue notifications only arrive with WUNTRACED/WCONTINUED.
            Ok(_) | Err(Errno::EINTR) => {}
            Err(errno) => {
                return Err(LaunchError::Wait {
                    pid,
                    code: errno as i32,
                });
            }
        }
    }
}

/// `argv` for the child: the program path followed by `args`.
fn build_argv(program: &CString, args: &[String]) -> Result<CStringArray, LaunchError> {
    let mut items = Vec::with_capacity(args.len() + 1);
    items.push(program.clone());
    for arg in args {
        items.push(
            CString::new(arg.as_bytes())
                .map_err(|e| LaunchError::InvalidRequest(e.to_string()))?,
        );
    }
    Ok(CStringArray::new(items))
}

/// The caller's environment as `KEY=VALUE` strings.
fn build_envp() -> CStringArray {
    let items = std::env::vars_os()
        .filter_map(|(key, value)| {
            let mut entry = Vec::with_capacity(key.len() + value.len() + 1);
            entry.extend_from_slice(key.as_bytes());
            entry.push(b'=');
            entry.extend_from_slice(value.as_bytes());
            CString::new(entry).ok()
        })
        .collect();
    CStringArray::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_starts_with_program() {
        let program = CString::new("/bin/echo").unwrap();
        // Only checks construction; the array's pointers are exercised by spawn tests.
        assert!(build_argv(&program, &["a".into(), "b".into()]).is_ok());
    }

    #[test]
    fn test_wait_for_unknown_pid_reports_errno() {
        let err = wait_for_exit(i32::MAX).unwrap_err();
        assert!(matches!(err, LaunchError::Wait { code, .. } if code == libc::ECHILD));
    }

    #[test]
    fn test_runs_true_with_inherited_identity() {
        let launcher = InheritedLauncher::default();
        let request = LaunchRequest::new("/bin/sh", ["-c", "exit 0"]).unwrap();
        let result = launcher.run_elevated(&request).unwrap();
        assert!(result.success());
    }

    #[test]
    #[cfg(target_vendor = "apple")]
    fn test_inherited_launch_still_gets_cloexec_default_attributes() {
        assert!(close_unlisted_descriptors(InheritedIdentity.attributes().unwrap()).is_ok());
    }

    #[test]
    #[cfg(not(target_vendor = "apple"))]
    fn test_root_launcher_fails_before_spawning_off_apple() {
        let launcher = RootLauncher::root();
        let request = LaunchRequest::new("/bin/sh", ["-c", "exit 0"]).unwrap();
        let err = launcher.run_elevated(&request).unwrap_err();
        assert!(matches!(err, LaunchError::AttributeConfiguration { .. }));
    }
}
