//! Extraction configuration
//!
//! ```toml
//! allow_custom_host = true
//! enforce_version = false
//! ```

use crate::error::FlakeLockError;
use serde::Deserialize;
use std::path::Path;

/// Knobs that distinguish the sibling-file and inline extraction modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Honour `original.host` for forge inputs and classify tarball inputs.
    /// When off, forge inputs always use their canonical host and tarball
    /// inputs are skipped.
    pub allow_custom_host: bool,

    /// Reject lock graphs whose version is not the supported one
    pub enforce_version: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::sibling_file()
    }
}

impl ExtractConfig {
    /// Preset for lock files read next to a package file
    #[must_use]
    pub const fn sibling_file() -> Self {
        Self {
            allow_custom_host: true,
            enforce_version: false,
        }
    }

    /// Preset for lock graph content passed in directly
    #[must_use]
    pub const fn inline() -> Self {
        Self {
            allow_custom_host: false,
            enforce_version: true,
        }
    }
}

/// Settings read from a TOML file.
///
/// Keys left out of the file keep the value of the preset they are
/// applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Overrides [`ExtractConfig::allow_custom_host`]
    pub allow_custom_host: Option<bool>,
    /// Overrides [`ExtractConfig::enforce_version`]
    pub enforce_version: Option<bool>,
}

impl ConfigOverrides {
    /// Parse overrides from TOML text
    ///
    /// # Errors
    /// Returns an error for malformed TOML or unknown keys
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, FlakeLockError> {
        toml::from_str(content).map_err(|e| FlakeLockError::config(origin, e.to_string()))
    }

    /// Load overrides from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, FlakeLockError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FlakeLockError::config(path, e.to_string()))?;
        Self::from_toml(&content, path)
    }

    /// Apply the keys that are set on top of `base`
    #[must_use]
    pub fn apply(self, mut base: ExtractConfig) -> ExtractConfig {
        if let Some(allow) = self.allow_custom_host {
            base.allow_custom_host = allow;
        }
        if let Some(enforce) = self.enforce_version {
            base.enforce_version = enforce;
        }
        base
    }
}
