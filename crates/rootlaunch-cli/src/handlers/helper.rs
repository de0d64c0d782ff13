//! `helper` command handler.

use anyhow::Result;
use rootlaunch_core::HelperCommand;

use super::echo_output;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::helper_commands::HelperSubcommand;

/// Run the helper for `subcommand`.
///
/// A single invocation echoes the helper's output and mirrors its exit
/// status. Several bundles run as a batch and exit non-zero when any of
/// them failed.
pub fn execute(ctx: &CliContext, subcommand: &HelperSubcommand) -> Result<i32> {
    let commands = subcommand.to_commands();

    match commands.as_slice() {
        [single] if !single.needs_uicache_rebuild() => run_single(ctx, single),
        _ => Ok(run_batch(ctx, &commands)),
    }
}

fn run_single(ctx: &CliContext, command: &HelperCommand) -> Result<i32> {
    let result = ctx.helpers.run(command).map_err(CliError::from)?;
    echo_output(&result);
    Ok(result.exit_status())
}

fn run_batch(ctx: &CliContext, commands: &[HelperCommand]) -> i32 {
    let summary = ctx.helpers.run_batch(commands);

    println!(
        "{} succeeded, {} failed{}",
        summary.succeeded,
        summary.failed,
        if summary.rebuilt_uicache {
            ", icon cache rebuilt"
        } else {
            ""
        }
    );
    i32::from(summary.failed > 0)
}
