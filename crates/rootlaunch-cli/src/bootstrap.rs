//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Launcher (root persona or inherited identity, via rootlaunch-runtime)
//! - Helper service (via rootlaunch-core)
//! - Download orchestrator with its content fetcher and event channel

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rootlaunch_core::ports::{ChannelDownloadEmitter, ContentFetcherPort};
use rootlaunch_core::{
    CoreError, DownloadEvent, DownloadOrchestrator, HelperService, PrivilegedLauncherPort,
    Settings, validate_settings,
};
use rootlaunch_runtime::{
    InheritedLauncher, PersonaIdentity, SpawnLauncher, UnavailableContentFetcher,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: Settings,
}

impl CliConfig {
    /// Create config with default settings.
    pub const fn with_defaults() -> Self {
        Self {
            settings: Settings::with_defaults(),
        }
    }

    /// Apply global flags on top of the defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut settings = Settings::with_defaults();
        if let Some(persona) = cli.persona {
            settings.persona_id = Some(persona);
        }
        settings.helper_path.clone_from(&cli.helper);
        if cli.no_elevate {
            settings.elevate = Some(false);
        }
        Self { settings }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Launcher used for `run` and by the helper service.
    pub launcher: Arc<dyn PrivilegedLauncherPort>,
    /// Root helper invocations.
    pub helpers: HelperService,
    /// Download coordinator.
    pub downloads: DownloadOrchestrator,
    /// Events emitted by `downloads`.
    pub download_events: UnboundedReceiver<DownloadEvent>,
    /// Effective settings.
    pub settings: Settings,
}

/// Bootstrap the CLI application.
///
/// Validates the settings, picks the launcher for the configured identity
/// and wires the services on top of it.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    bootstrap_with(config, Arc::new(UnavailableContentFetcher))
}

/// Bootstrap with a custom content fetcher (for testing).
pub fn bootstrap_with(
    config: CliConfig,
    fetcher: Arc<dyn ContentFetcherPort>,
) -> Result<CliContext> {
    let settings = config.settings;
    validate_settings(&settings)
        .map_err(CoreError::from)
        .map_err(CliError::from)?;

    let launcher: Arc<dyn PrivilegedLauncherPort> = if settings.effective_elevate() {
        debug!(persona_id = settings.effective_persona_id(), "Using persona launcher");
        Arc::new(SpawnLauncher::new(PersonaIdentity::new(settings.identity())))
    } else {
        debug!("Using inherited-identity launcher");
        Arc::new(InheritedLauncher::default())
    };

    let mut helpers = HelperService::new(Arc::clone(&launcher));
    if let Some(ref path) = settings.helper_path {
        helpers = helpers.with_helper_path(path);
    }

    let (emitter, download_events) = ChannelDownloadEmitter::channel();
    let downloads = DownloadOrchestrator::new(fetcher, Arc::new(emitter));

    Ok(CliContext {
        launcher,
        helpers,
        downloads,
        download_events,
        settings,
    })
}

impl CliContext {
    /// Helper location commands will run against.
    pub fn helper_path(&self) -> Result<PathBuf, CoreError> {
        Ok(self.helpers.helper_path()?)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_config_with_defaults_elevates() {
        let config = CliConfig::with_defaults();
        assert!(config.settings.effective_elevate());
        assert_eq!(config.settings.effective_persona_id(), 99);
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "rootlaunch",
            "--no-elevate",
            "--persona",
            "501",
            "--helper",
            "/opt/rl/roothelper",
            "helper-path",
        ]);
        let config = CliConfig::from_cli(&cli);
        assert!(!config.settings.effective_elevate());
        assert_eq!(config.settings.persona_id, Some(501));
        assert_eq!(
            config.settings.helper_path,
            Some(PathBuf::from("/opt/rl/roothelper"))
        );
    }

    #[test]
    fn test_bootstrap_rejects_relative_helper() {
        let mut config = CliConfig::with_defaults();
        config.settings.helper_path = Some(PathBuf::from("helpers/roothelper"));
        let err = bootstrap(config).err().expect("relative helper path is rejected");
        assert_eq!(err.downcast_ref::<CliError>().map(CliError::exit_code), Some(78));
    }

    #[test]
    fn test_bootstrap_uses_explicit_helper_path() {
        let mut config = CliConfig::with_defaults();
        config.settings.helper_path = Some(PathBuf::from("/opt/rl/roothelper"));
        let ctx = bootstrap(config).unwrap();
        assert_eq!(ctx.helper_path().unwrap(), PathBuf::from("/opt/rl/roothelper"));
    }
}
