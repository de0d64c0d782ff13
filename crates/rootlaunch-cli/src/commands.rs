//! Top-level subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::helper_commands::HelperSubcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run an executable elevated, echo its output and exit with its status
    Run {
        /// Absolute path of the executable
        path: PathBuf,

        /// Arguments passed to the executable
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print where the root helper is expected
    HelperPath,

    /// Invoke the root helper
    Helper {
        #[command(subcommand)]
        command: HelperSubcommand,
    },

    /// Request a specific version of an application
    Download {
        /// Store link or numeric application id
        target: String,

        /// External version identifier to fetch
        #[arg(long = "version-id")]
        version_id: i64,
    },
}
