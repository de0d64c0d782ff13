//! Runs root helper subcommands through the privileged launcher.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{HelperCommand, LaunchRequest, LaunchResult};
use crate::paths::resolve_helper_path;
use crate::ports::{LaunchError, PrivilegedLauncherPort};

/// Outcome counts for a batch of helper commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// A trailing `rebuild_uicache` ran successfully.
    pub rebuilt_uicache: bool,
}

/// Service for invoking the root helper.
pub struct HelperService {
    launcher: Arc<dyn PrivilegedLauncherPort>,
    helper_path: Option<PathBuf>,
}

impl HelperService {
    /// Create a service that locates the helper next to the running executable.
    pub fn new(launcher: Arc<dyn PrivilegedLauncherPort>) -> Self {
        Self {
            launcher,
            helper_path: None,
        }
    }

    /// Use an explicit helper location instead of resolving it.
    #[must_use]
    pub fn with_helper_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.helper_path = Some(path.into());
        self
    }

    /// Location of the helper binary that commands run against.
    pub fn helper_path(&self) -> Result<PathBuf, LaunchError> {
        match self.helper_path {
            Some(ref path) => Ok(path.clone()),
            None => Ok(resolve_helper_path()?),
        }
    }

    /// Run one helper command elevated.
    ///
    /// A non-zero exit from the helper is logged and returned as data.
    pub fn run(&self, command: &HelperCommand) -> Result<LaunchResult, LaunchError> {
        let helper = self.helper_path()?;
        let request = LaunchRequest::new(helper, command.args())?;

        info!(command = command.name(), "Spawning root helper");
        let result = self.launcher.run_elevated(&request)?;

        if !result.standard_output().is_empty() {
            debug!(command = command.name(), "helper stdout: {}", result.standard_output());
        }
        if !result.standard_error().is_empty() {
            debug!(command = command.name(), "helper stderr: {}", result.standard_error());
        }
        if !result.success() {
            warn!(
                command = command.name(),
                exit_status = result.exit_status(),
                "Root helper exited unsuccessfully"
            );
        }

        Ok(result)
    }

    /// Run several commands, counting outcomes instead of stopping at the
    /// first failure.
    ///
    /// When any successful command changes what the home screen shows, the
    /// UI cache is rebuilt once at the end.
    pub fn run_batch(&self, commands: &[HelperCommand]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut needs_rebuild = false;

        for command in commands {
            match self.run(command) {
                Ok(result) if result.success() => {
                    summary.succeeded += 1;
                    needs_rebuild |= command.needs_uicache_rebuild();
                }
                Ok(_) => summary.failed += 1,
                Err(e) => {
                    warn!(command = command.name(), step = e.step(), "Root helper launch failed: {e}");
                    summary.failed += 1;
                }
            }
        }

        if needs_rebuild {
            summary.rebuilt_uicache = self
                .run(&HelperCommand::RebuildUiCache)
                .is_ok_and(|result| result.success());
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Helper batch finished"
        );
        summary
    }
}
