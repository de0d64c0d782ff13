//! `helper-path` command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the helper location, marking it when nothing exists there.
pub fn execute(ctx: &CliContext) -> Result<i32> {
    let path = ctx.helper_path().map_err(CliError::from)?;
    println!("{}", path.display());
    if !path.is_file() {
        eprintln!("warning: no helper binary at {}", path.display());
    }
    Ok(0)
}
