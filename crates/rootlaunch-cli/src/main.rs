//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers, and the process exits
//! with the code the handler returns.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use rootlaunch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            exit_code(code)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(0);
    };

    let mut ctx = bootstrap(config)?;

    match command {
        Commands::Run { path, args } => handlers::run::execute(&ctx, path, args).await,
        Commands::HelperPath => handlers::helper_path::execute(&ctx),
        Commands::Helper { command } => handlers::helper::execute(&ctx, &command),
        Commands::Download { target, version_id } => {
            handlers::download::execute(&mut ctx, &target, version_id).await
        }
    }
}

/// Exit statuses outside 0..=255 cannot be reported; they become 1.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
