//! Identity policies for spawned children.
//!
//! A policy decides which spawn attributes a launch carries. The persona
//! policy builds a fresh override attribute set for every launch; the
//! inherited policy attaches none, so the child runs as the caller.

use rootlaunch_core::{IdentityOverride, LaunchError};
use tracing::debug;

use crate::ffi::{POSIX_SPAWN_PERSONA_FLAGS_OVERRIDE, SpawnAttributes};

/// Source of spawn attributes for one launch.
pub trait SpawnIdentity: Send + Sync {
    /// Build the attributes for a single launch, or `None` to inherit
    /// the caller's identity. Called before any pipe is created.
    fn attributes(&self) -> Result<Option<SpawnAttributes>, LaunchError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Build an attribute set that spawns the child under `identity`.
///
/// The persona id and override flag are set first because the kernel
/// rejects UID/GID overrides on an attribute set without them. On failure
/// the partially configured set is destroyed, never returned.
pub fn build_identity_attributes(
    identity: &IdentityOverride,
) -> Result<SpawnAttributes, LaunchError> {
    let fail = |call: &'static str| move |code: i32| LaunchError::AttributeConfiguration { call, code };

    let mut attrs = SpawnAttributes::new().map_err(fail("posix_spawnattr_init"))?;

    let flags = if identity.override_flag {
        POSIX_SPAWN_PERSONA_FLAGS_OVERRIDE
    } else {
        0
    };
    attrs
        .set_persona(identity.persona_id, flags)
        .map_err(fail("posix_spawnattr_set_persona_np"))?;
    attrs
        .set_persona_uid(identity.override_uid)
        .map_err(fail("posix_spawnattr_set_persona_uid_np"))?;
    attrs
        .set_persona_gid(identity.override_gid)
        .map_err(fail("posix_spawnattr_set_persona_gid_np"))?;

    debug!(
        persona_id = identity.persona_id,
        uid = identity.override_uid,
        gid = identity.override_gid,
        "Built persona spawn attributes"
    );
    Ok(attrs)
}

/// Spawn children under a persona override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaIdentity {
    identity: IdentityOverride,
}

impl PersonaIdentity {
    pub const fn new(identity: IdentityOverride) -> Self {
        Self { identity }
    }

    /// Root persona, UID 0 / GID 0.
    pub const fn root() -> Self {
        Self::new(IdentityOverride::root())
    }

    pub const fn identity(&self) -> &IdentityOverride {
        &self.identity
    }
}

impl Default for PersonaIdentity {
    fn default() -> Self {
        Self::root()
    }
}

impl SpawnIdentity for PersonaIdentity {
    fn attributes(&self) -> Result<Option<SpawnAttributes>, LaunchError> {
        build_identity_attributes(&self.identity).map(Some)
    }

    fn describe(&self) -> String {
        format!(
            "persona {} (uid {}, gid {})",
            self.identity.persona_id, self.identity.override_uid, self.identity.override_gid
        )
    }
}

/// Spawn children with the caller's own identity.
///
/// Used where the persona API does not exist, and to exercise the capture
/// pipeline without privilege.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InheritedIdentity;

impl SpawnIdentity for InheritedIdentity {
    fn attributes(&self) -> Result<Option<SpawnAttributes>, LaunchError> {
        Ok(None)
    }

    fn describe(&self) -> String {
        "inherited".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherited_identity_has_no_attributes() {
        assert!(InheritedIdentity.attributes().unwrap().is_none());
    }

    #[test]
    #[cfg(not(target_vendor = "apple"))]
    fn test_persona_builder_fails_on_first_call_off_apple() {
        let err = build_identity_attributes(&IdentityOverride::root())
            .err()
            .expect("persona API is unavailable here");
        match err {
            LaunchError::AttributeConfiguration { call, code } => {
                assert_eq!(call, "posix_spawnattr_set_persona_np");
                assert_eq!(code, libc::ENOTSUP);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[cfg(target_vendor = "apple")]
    fn test_persona_builder_succeeds_on_apple() {
        assert!(build_identity_attributes(&IdentityOverride::root()).is_ok());
    }

    #[test]
    fn test_persona_describe_names_ids() {
        assert_eq!(
            PersonaIdentity::root().describe(),
            "persona 99 (uid 0, gid 0)"
        );
    }
}
