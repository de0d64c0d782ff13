//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Launch commands and the root helper under an elevated persona.
#[derive(Debug, Parser)]
#[command(name = "rootlaunch")]
#[command(about = "Run commands under an elevated persona and capture their output")]
#[command(version)]
pub struct Cli {
    /// Use this helper binary instead of the one next to the executable
    #[arg(long, global = true, env = "ROOTLAUNCH_HELPER")]
    pub helper: Option<PathBuf>,

    /// Persona to request for elevated launches
    #[arg(long, global = true, env = "ROOTLAUNCH_PERSONA")]
    pub persona: Option<u32>,

    /// Run children with the caller's identity instead of elevating
    #[arg(long = "no-elevate", global = true, env = "ROOTLAUNCH_NO_ELEVATE")]
    pub no_elevate: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
