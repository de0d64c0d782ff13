//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies.
//! Adapters fill them from flags, environment or a config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{IdentityOverride, ROOT_PERSONA_ID};

/// Launcher settings.
///
/// All fields are optional to support partial configuration and graceful
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Persona record to request for elevated launches.
    pub persona_id: Option<u32>,

    /// Explicit helper binary location, bypassing executable-relative resolution.
    pub helper_path: Option<PathBuf>,

    /// Whether launches attach the identity override. Disabling it runs
    /// children with the caller's own identity.
    pub elevate: Option<bool>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            persona_id: Some(ROOT_PERSONA_ID),
            helper_path: None,
            elevate: Some(true),
        }
    }

    /// Get the effective persona id (with default fallback).
    #[must_use]
    pub const fn effective_persona_id(&self) -> u32 {
        match self.persona_id {
            Some(id) => id,
            None => ROOT_PERSONA_ID,
        }
    }

    /// Identity override built from these settings.
    #[must_use]
    pub const fn identity(&self) -> IdentityOverride {
        IdentityOverride::with_persona(self.effective_persona_id())
    }

    /// Whether launches should be elevated (defaults to true).
    #[must_use]
    pub const fn effective_elevate(&self) -> bool {
        match self.elevate {
            Some(elevate) => elevate,
            None => true,
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Persona id 0 is reserved and cannot be requested")]
    ReservedPersona,

    #[error("Helper path cannot be empty")]
    EmptyHelperPath,

    #[error("Helper path must be absolute, got {0}")]
    RelativeHelperPath(PathBuf),
}

/// Validate settings before they are used to build launchers.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.persona_id == Some(0) {
        return Err(SettingsError::ReservedPersona);
    }

    if let Some(ref path) = settings.helper_path {
        if path.as_os_str().is_empty() {
            return Err(SettingsError::EmptyHelperPath);
        }
        if !path.is_absolute() {
            return Err(SettingsError::RelativeHelperPath(path.clone()));
        }
    }

    Ok(())
}
