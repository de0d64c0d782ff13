//! Output pipes and concurrent draining.

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::OwnedFd;
use std::thread;

use rootlaunch_core::{LaunchError, StreamKind};

/// One unidirectional pipe carrying a child's output stream.
///
/// Both ends are close-on-exec in the parent; the child only sees the
/// write end through the dup2 onto its stdout/stderr.
#[derive(Debug)]
pub struct OutputPipe {
    pub read: OwnedFd,
    pub write: OwnedFd,
}

impl OutputPipe {
    pub fn new(stream: StreamKind) -> Result<Self, LaunchError> {
        let (read, write) = cloexec_pipe().map_err(|code| LaunchError::Pipe { stream, code })?;
        Ok(Self { read, write })
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn cloexec_pipe() -> Result<(OwnedFd, OwnedFd), i32> {
    use nix::fcntl::OFlag;

    nix::unistd::pipe2(OFlag::O_CLOEXEC).map_err(|errno| errno as i32)
}

/// Not atomic: a spawn on another thread can run between `pipe` and the
/// flag update. On Apple targets the launcher spawns with
/// `POSIX_SPAWN_CLOEXEC_DEFAULT`, so such a child still sees only the
/// descriptors named by its own file actions.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn cloexec_pipe() -> Result<(OwnedFd, OwnedFd), i32> {
    use std::os::fd::AsFd;

    let (read, write) = nix::unistd::pipe().map_err(|errno| errno as i32)?;
    crate::ffi::set_cloexec(read.as_fd())?;
    crate::ffi::set_cloexec(write.as_fd())?;
    Ok((read, write))
}

/// Captured bytes of both streams.
#[derive(Debug, Default)]
pub struct DrainedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Read both streams to EOF concurrently.
///
/// stderr is read on a scoped thread while stdout is read on the calling
/// thread, so a child blocked writing one stream never stalls the other.
/// Both descriptors are closed when this returns, on every path.
pub fn drain(stdout: OwnedFd, stderr: OwnedFd) -> Result<DrainedOutput, LaunchError> {
    thread::scope(|scope| {
        let stderr_reader = thread::Builder::new()
            .name("rootlaunch-stderr".into())
            .spawn_scoped(scope, move || read_to_end(stderr))
            .map_err(|e| drain_error(StreamKind::Stderr, &e))?;

        let stdout = read_to_end(stdout).map_err(|e| drain_error(StreamKind::Stdout, &e));
        let stderr = stderr_reader
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("reader thread panicked")))
            .map_err(|e| drain_error(StreamKind::Stderr, &e));

        Ok(DrainedOutput {
            stdout: stdout?,
            stderr: stderr?,
        })
    })
}

fn read_to_end(fd: OwnedFd) -> io::Result<Vec<u8>> {
    let mut file = File::from(fd);
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn drain_error(stream: StreamKind, err: &io::Error) -> LaunchError {
    LaunchError::Drain {
        stream,
        message: err.to_string(),
    }
}
