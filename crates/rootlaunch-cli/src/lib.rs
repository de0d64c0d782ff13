//! Command-line adapter for rootlaunch.
//!
//! `main.rs` parses arguments, builds a [`CliContext`] through
//! [`bootstrap`] and hands it to the handlers in [`handlers`].

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary target only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod helper_commands;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use helper_commands::HelperSubcommand;
pub use parser::Cli;
