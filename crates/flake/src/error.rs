//! Error types for flake.lock validation and extraction

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors related to reading and validating a flake.lock graph
#[derive(Debug, Error, Diagnostic)]
pub enum FlakeLockError {
    /// The lock file is not valid JSON
    #[error("Failed to parse flake.lock: {0}")]
    #[diagnostic(
        code(flakedeps::flake::parse),
        help("Ensure flake.lock is valid JSON as written by 'nix flake lock'")
    )]
    ParseError(String),

    /// The JSON does not match the lock graph schema
    #[error("Invalid flake.lock: {diagnostic}")]
    #[diagnostic(
        code(flakedeps::flake::validation),
        help("The lock graph must contain 'nodes', 'root' and 'version', and every locked input needs type, rev, narHash, revCount and lastModified")
    )]
    Validation {
        /// Path-qualified description of the mismatch
        diagnostic: String,
    },

    /// The lock graph uses a format version this crate does not read
    #[error("Unsupported flake.lock version {found} (supported: {supported})")]
    #[diagnostic(
        code(flakedeps::flake::version),
        help("Regenerate the lock file with a Nix release that writes version {supported}")
    )]
    UnsupportedVersion {
        /// Version found in the lock file
        found: i64,
        /// The only version accepted in strict mode
        supported: i64,
    },

    /// Failed to read the lock file
    #[error("Failed to read flake.lock at {path}: {message}")]
    #[diagnostic(
        code(flakedeps::flake::io),
        help("Check that flake.lock exists and is readable")
    )]
    IoError {
        /// Path to the flake.lock file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Extraction configuration could not be loaded
    #[error("Invalid extraction config at {path}: {message}")]
    #[diagnostic(
        code(flakedeps::flake::config),
        help("Known keys are 'allow_custom_host' and 'enforce_version'")
    )]
    ConfigError {
        /// Path to the config file
        path: PathBuf,
        /// Error message
        message: String,
    },
}

impl FlakeLockError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(diagnostic: impl Into<String>) -> Self {
        Self::Validation {
            diagnostic: diagnostic.into(),
        }
    }

    /// Create an unsupported version error
    #[must_use]
    pub const fn unsupported_version(found: i64, supported: i64) -> Self {
        Self::UnsupportedVersion { found, supported }
    }

    /// Create an IO error
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = FlakeLockError::validation("nodes: invalid type: string \"x\", expected a map");
        assert_eq!(
            err.to_string(),
            "Invalid flake.lock: nodes: invalid type: string \"x\", expected a map"
        );
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = FlakeLockError::unsupported_version(6, 7);
        assert_eq!(
            err.to_string(),
            "Unsupported flake.lock version 6 (supported: 7)"
        );
    }

    #[test]
    fn test_io_message_includes_path() {
        let err = FlakeLockError::io("/tmp/flake.lock", "permission denied");
        assert!(err.to_string().contains("/tmp/flake.lock"));
        assert!(err.to_string().contains("permission denied"));
    }
}
