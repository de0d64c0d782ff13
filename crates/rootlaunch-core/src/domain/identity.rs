//! Persona identity override.

use serde::{Deserialize, Serialize};

/// Persona record that maps to the root user on Apple platforms.
pub const ROOT_PERSONA_ID: u32 = 99;

/// Identity a spawned process should adopt instead of inheriting ours.
///
/// The override flag gates the other fields: without it the OS ignores the
/// persona, UID and GID values and applies default persona inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityOverride {
    /// Persona record the child is created under.
    pub persona_id: u32,
    /// UID the child runs with.
    pub override_uid: u32,
    /// GID the child runs with.
    pub override_gid: u32,
    /// Force the override over default persona inheritance.
    pub override_flag: bool,
}

impl IdentityOverride {
    /// Root persona with UID 0 / GID 0.
    #[must_use]
    pub const fn root() -> Self {
        Self::with_persona(ROOT_PERSONA_ID)
    }

    /// Root UID/GID under a different persona record.
    #[must_use]
    pub const fn with_persona(persona_id: u32) -> Self {
        Self {
            persona_id,
            override_uid: 0,
            override_gid: 0,
            override_flag: true,
        }
    }

    /// Whether the identity fields will take effect at spawn time.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        self.override_flag
    }
}

impl Default for IdentityOverride {
    fn default() -> Self {
        Self::root()
    }
}
