//! Subcommands understood by the root helper binary.

use std::fmt;
use std::path::PathBuf;

/// A privileged operation performed by the helper on our behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperCommand {
    /// Remove the bundle's store metadata so the store stops offering updates.
    BlockUpdates { bundle_path: PathBuf },
    /// Restore the bundle's store metadata from the helper's backup.
    RestoreUpdates { bundle_path: PathBuf },
    /// Rewrite the version string the store sees for a bundle.
    SpoofAppVersion {
        bundle_path: PathBuf,
        version: String,
    },
    /// Rebuild the icon/launch services cache.
    RebuildUiCache,
}

impl HelperCommand {
    /// Subcommand name as the helper expects it on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BlockUpdates { .. } => "block_updates",
            Self::RestoreUpdates { .. } => "restore_updates",
            Self::SpoofAppVersion { .. } => "spoof_app_version",
            Self::RebuildUiCache => "rebuild_uicache",
        }
    }

    /// Full argument vector for the helper, excluding the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.name().to_string()];
        match self {
            Self::BlockUpdates { bundle_path } | Self::RestoreUpdates { bundle_path } => {
                args.push(bundle_path.to_string_lossy().into_owned());
            }
            Self::SpoofAppVersion {
                bundle_path,
                version,
            } => {
                args.push(bundle_path.to_string_lossy().into_owned());
                args.push(version.clone());
            }
            Self::RebuildUiCache => {}
        }
        args
    }

    /// Whether a successful run changes what the home screen shows,
    /// requiring a UI cache rebuild afterwards.
    pub const fn needs_uicache_rebuild(&self) -> bool {
        matches!(self, Self::BlockUpdates { .. } | Self::RestoreUpdates { .. })
    }
}

impl fmt::Display for HelperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_updates_args() {
        let cmd = HelperCommand::BlockUpdates {
            bundle_path: PathBuf::from("/var/containers/Bundle/Application/X/App.app"),
        };
        assert_eq!(
            cmd.args(),
            vec![
                "block_updates".to_string(),
                "/var/containers/Bundle/Application/X/App.app".to_string()
            ]
        );
        assert!(cmd.needs_uicache_rebuild());
    }

    #[test]
    fn test_spoof_version_args_include_version_last() {
        let cmd = HelperCommand::SpoofAppVersion {
            bundle_path: PathBuf::from("/apps/Foo.app"),
            version: "999.999.999".to_string(),
        };
        let args = cmd.args();
        assert_eq!(args[0], "spoof_app_version");
        assert_eq!(args[2], "999.999.999");
        assert!(!cmd.needs_uicache_rebuild());
    }

    #[test]
    fn test_rebuild_uicache_has_no_operands() {
        assert_eq!(HelperCommand::RebuildUiCache.args(), vec!["rebuild_uicache"]);
        assert_eq!(HelperCommand::RebuildUiCache.to_string(), "rebuild_uicache");
    }
}
