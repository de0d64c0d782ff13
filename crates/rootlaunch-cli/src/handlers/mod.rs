//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<i32>`, async
//!   when the command awaits the runtime
//! - Thin wrappers that validate CLI input, call the core services and
//!   format output for the terminal
//! - The returned value is the process exit code

pub mod download;
pub mod helper;
pub mod helper_path;
pub mod run;

use rootlaunch_core::LaunchResult;

/// Echo a child's captured streams unchanged.
fn echo_output(result: &LaunchResult) {
    print!("{}", result.standard_output());
    eprint!("{}", result.standard_error());
}
