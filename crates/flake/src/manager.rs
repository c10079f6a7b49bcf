//! Identity of the Nix flake manager within a multi-ecosystem update tool

use crate::dependency::GIT_REFS_DATASOURCE;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Manager identifier
pub const MANAGER_ID: &str = "nix";

/// Name of the lock file read next to each package file
pub const LOCK_FILE_NAME: &str = "flake.lock";

/// Pattern selecting package files by their repository-relative path
pub const PACKAGE_FILE_PATTERN: &str = r"(^|/)flake\.nix$";

/// Datasources the emitted dependencies refer to
pub const SUPPORTED_DATASOURCES: &[&str] = &[GIT_REFS_DATASOURCE];

#[allow(clippy::expect_used)] // literal pattern, covered by unit tests
static PACKAGE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PACKAGE_FILE_PATTERN).expect("package file pattern is valid")
});

/// Whether `path` names a flake package file
#[must_use]
pub fn is_package_file(path: &Path) -> bool {
    let normalized = path.to_string_lossy().replace('\\', "/");
    PACKAGE_FILE.is_match(&normalized)
}
