//! Subcommands of `rootlaunch helper`.

use std::path::PathBuf;

use clap::Subcommand;
use rootlaunch_core::HelperCommand;

#[derive(Debug, Subcommand)]
pub enum HelperSubcommand {
    /// Stop the store from offering updates for the given bundles
    BlockUpdates {
        #[arg(required = true)]
        bundles: Vec<PathBuf>,
    },

    /// Let the store offer updates again for the given bundles
    RestoreUpdates {
        #[arg(required = true)]
        bundles: Vec<PathBuf>,
    },

    /// Change the version the store sees for a bundle
    SpoofVersion { bundle: PathBuf, version: String },

    /// Rebuild the home screen icon cache
    RebuildUicache,
}

impl HelperSubcommand {
    /// Helper invocations this subcommand expands to.
    pub fn to_commands(&self) -> Vec<HelperCommand> {
        match self {
            Self::BlockUpdates { bundles } => bundles
                .iter()
                .map(|bundle| HelperCommand::BlockUpdates {
                    bundle_path: bundle.clone(),
                })
                .collect(),
            Self::RestoreUpdates { bundles } => bundles
                .iter()
                .map(|bundle| HelperCommand::RestoreUpdates {
                    bundle_path: bundle.clone(),
                })
                .collect(),
            Self::SpoofVersion { bundle, version } => vec![HelperCommand::SpoofAppVersion {
                bundle_path: bundle.clone(),
                version: version.clone(),
            }],
            Self::RebuildUicache => vec![HelperCommand::RebuildUiCache],
        }
    }
}
