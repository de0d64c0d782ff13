//! `run` command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rootlaunch_core::LaunchRequest;
use tracing::debug;

use super::echo_output;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run `path` elevated, echo its output and return its exit status.
pub async fn execute(ctx: &CliContext, path: PathBuf, args: Vec<String>) -> Result<i32> {
    let request = LaunchRequest::new(path, args).map_err(CliError::from)?;
    let launcher = Arc::clone(&ctx.launcher);

    // The launch blocks until the child exits.
    let result = tokio::task::spawn_blocking(move || launcher.run_elevated(&request))
        .await?
        .map_err(CliError::from)?;

    debug!(exit_status = result.exit_status(), signal = ?result.signal(), "Child finished");
    echo_output(&result);
    Ok(result.exit_status())
}
