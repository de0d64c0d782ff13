//! Thin safe wrappers over `posix_spawn` and its attribute objects.
//!
//! This is the only module in the workspace that contains `unsafe` code.
//! Every raw object is owned by a wrapper that destroys it on drop, so
//! error paths never leak spawn attributes or file actions.

use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::ptr;

use libc::{c_char, c_int, pid_t, posix_spawn_file_actions_t, posix_spawnattr_t};

/// Flag telling the kernel to apply the persona ids instead of inheriting.
pub const POSIX_SPAWN_PERSONA_FLAGS_OVERRIDE: u32 = 1;

/// Spawn flag: every descriptor not named by a file action is closed in
/// the child.
#[cfg(target_vendor = "apple")]
pub const POSIX_SPAWN_CLOEXEC_DEFAULT: libc::c_short = 0x4000;

#[cfg(target_vendor = "apple")]
unsafe extern "C" {
    fn posix_spawnattr_set_persona_np(
        attr: *mut posix_spawnattr_t,
        persona_id: libc::uid_t,
        flags: u32,
    ) -> c_int;
    fn posix_spawnattr_set_persona_uid_np(
        attr: *mut posix_spawnattr_t,
        uid: libc::uid_t,
    ) -> c_int;
    fn posix_spawnattr_set_persona_gid_np(
        attr: *mut posix_spawnattr_t,
        gid: libc::gid_t,
    ) -> c_int;
    fn posix_spawnattr_setflags(attr: *mut posix_spawnattr_t, flags: libc::c_short) -> c_int;
    fn posix_spawn_file_actions_addinherit_np(
        actions: *mut posix_spawn_file_actions_t,
        fd: c_int,
    ) -> c_int;
}

/// Owned `posix_spawnattr_t`.
pub struct SpawnAttributes {
    raw: Box<posix_spawnattr_t>,
}

impl SpawnAttributes {
    /// Initialize an empty attribute set. Errors carry the raw status code.
    pub fn new() -> Result<Self, c_int> {
        let mut raw = Box::new(MaybeUninit::<posix_spawnattr_t>::uninit());
        // SAFETY: `raw` points at writable storage for one attribute object.
        let rc = unsafe { libc::posix_spawnattr_init(raw.as_mut_ptr()) };
        if rc != 0 {
            return Err(rc);
        }
        // SAFETY: posix_spawnattr_init succeeded, so the storage is initialized.
        let raw = unsafe { raw.assume_init() };
        Ok(Self { raw })
    }

    /// Request `persona_id` with `flags`.
    #[cfg(target_vendor = "apple")]
    pub fn set_persona(&mut self, persona_id: u32, flags: u32) -> Result<(), c_int> {
        // SAFETY: `self.raw` is an initialized attribute object we own.
        status(unsafe { posix_spawnattr_set_persona_np(&raw mut *self.raw, persona_id, flags) })
    }

    /// Override the persona's UID.
    #[cfg(target_vendor = "apple")]
    pub fn set_persona_uid(&mut self, uid: u32) -> Result<(), c_int> {
        // SAFETY: as above.
        status(unsafe { posix_spawnattr_set_persona_uid_np(&raw mut *self.raw, uid) })
    }

    /// Override the persona's GID.
    #[cfg(target_vendor = "apple")]
    pub fn set_persona_gid(&mut self, gid: u32) -> Result<(), c_int> {
        // SAFETY: as above.
        status(unsafe { posix_spawnattr_set_persona_gid_np(&raw mut *self.raw, gid) })
    }

    /// Replace the spawn flags.
    #[cfg(target_vendor = "apple")]
    pub fn set_flags(&mut self, flags: libc::c_short) -> Result<(), c_int> {
        // SAFETY: as above.
        status(unsafe { posix_spawnattr_setflags(&raw mut *self.raw, flags) })
    }

    #[cfg(not(target_vendor = "apple"))]
    pub fn set_persona(&mut self, _persona_id: u32, _flags: u32) -> Result<(), c_int> {
        Err(libc::ENOTSUP)
    }

    #[cfg(not(target_vendor = "apple"))]
    pub fn set_persona_uid(&mut self, _uid: u32) -> Result<(), c_int> {
        Err(libc::ENOTSUP)
    }

    #[cfg(not(target_vendor = "apple"))]
    pub fn set_persona_gid(&mut self, _gid: u32) -> Result<(), c_int> {
        Err(libc::ENOTSUP)
    }

    fn as_ptr(&self) -> *const posix_spawnattr_t {
        &raw const *self.raw
    }
}

impl Drop for SpawnAttributes {
    fn drop(&mut self) {
        // SAFETY: initialized in `new` and destroyed exactly once here.
        unsafe {
            libc::posix_spawnattr_destroy(&raw mut *self.raw);
        }
    }
}

/// Owned `posix_spawn_file_actions_t`.
pub struct FileActions {
    raw: Box<posix_spawn_file_actions_t>,
}

impl FileActions {
    pub fn new() -> Result<Self, c_int> {
        let mut raw = Box::new(MaybeUninit::<posix_spawn_file_actions_t>::uninit());
        // SAFETY: `raw` points at writable storage for one file-actions object.
        let rc = unsafe { libc::posix_spawn_file_actions_init(raw.as_mut_ptr()) };
        if rc != 0 {
            return Err(rc);
        }
        // SAFETY: init succeeded.
        let raw = unsafe { raw.assume_init() };
        Ok(Self { raw })
    }

    /// In the child, duplicate `fd` onto `target`.
    ///
    /// dup2 clears close-on-exec on `target`, so `fd` itself may be
    /// close-on-exec and will not survive into the child.
    pub fn add_dup2(&mut self, fd: BorrowedFd<'_>, target: c_int) -> Result<(), c_int> {
        // SAFETY: `self.raw` is initialized; `fd` is open for the duration of the call.
        status(unsafe {
            libc::posix_spawn_file_actions_adddup2(&raw mut *self.raw, fd.as_raw_fd(), target)
        })
    }

    /// Keep `fd` open in the child under `POSIX_SPAWN_CLOEXEC_DEFAULT`.
    #[cfg(target_vendor = "apple")]
    pub fn add_inherit(&mut self, fd: c_int) -> Result<(), c_int> {
        // SAFETY: `self.raw` is initialized; the call only records `fd`.
        status(unsafe { posix_spawn_file_actions_addinherit_np(&raw mut *self.raw, fd) })
    }

    fn as_ptr(&self) -> *const posix_spawn_file_actions_t {
        &raw const *self.raw
    }
}

impl Drop for FileActions {
    fn drop(&mut self) {
        // SAFETY: initialized in `new` and destroyed exactly once here.
        unsafe {
            libc::posix_spawn_file_actions_destroy(&raw mut *self.raw);
        }
    }
}

/// NULL-terminated array of C strings, as `argv` and `envp` expect.
pub struct CStringArray {
    _items: Vec<CString>,
    ptrs: Vec<*mut c_char>,
}

impl CStringArray {
    pub fn new(items: Vec<CString>) -> Self {
        let mut ptrs: Vec<*mut c_char> = items.iter().map(|s| s.as_ptr().cast_mut()).collect();
        ptrs.push(ptr::null_mut());
        Self {
            _items: items,
            ptrs,
        }
    }

    fn as_ptr(&self) -> *const *mut c_char {
        self.ptrs.as_ptr()
    }
}

/// Spawn `program`. Returns the child pid or the status posix_spawn reported.
pub fn spawn(
    program: &CStr,
    actions: &FileActions,
    attributes: Option<&SpawnAttributes>,
    argv: &CStringArray,
    envp: &CStringArray,
) -> Result<pid_t, c_int> {
    let mut pid: pid_t = 0;
    let attr_ptr = attributes.map_or(ptr::null(), SpawnAttributes::as_ptr);
    // SAFETY: every pointer refers to an initialized object that outlives
    // the call; argv and envp are NULL-terminated and their strings are
    // owned by the arrays. posix_spawn does not retain any of them.
    let rc = unsafe {
        libc::posix_spawn(
            &raw mut pid,
            program.as_ptr(),
            actions.as_ptr(),
            attr_ptr,
            argv.as_ptr(),
            envp.as_ptr(),
        )
    };
    status(rc).map(|()| pid)
}

/// Mark `fd` close-on-exec.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub fn set_cloexec(fd: BorrowedFd<'_>) -> Result<(), c_int> {
    // SAFETY: F_GETFD/F_SETFD only touch the descriptor flags of an open fd.
    unsafe {
        let flags = libc::fcntl(fd.as_raw_fd(), libc::F_GETFD);
        if flags == -1
            || libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, flags | libc::FD_CLOEXEC) == -1
        {
            return Err(std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(libc::EBADF));
        }
    }
    Ok(())
}

const fn status(rc: c_int) -> Result<(), c_int> {
    if rc == 0 { Ok(()) } else { Err(rc) }
}
