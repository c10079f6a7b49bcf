//! Output records handed to the version-resolution engine

use serde::{Deserialize, Serialize};

/// Datasource shared by every classified input: new revisions are looked up
/// as git references of `package_name`.
pub const GIT_REFS_DATASOURCE: &str = "git-refs";

/// One updatable input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PackageDependency {
    /// Node name in the lock graph
    pub dep_name: String,
    /// Loose reference the input follows (branch or tag), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    /// Pinned revision
    pub current_digest: String,
    /// Text to substitute on update; the pinned revision
    pub replace_string: String,
    /// Resolution scheme for new versions
    pub datasource: String,
    /// Fully qualified remote, usually an https URL
    pub package_name: String,
}

/// Result envelope of a successful extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageFileContent {
    /// Updatable inputs, never empty
    pub deps: Vec<PackageDependency>,
    /// Lock files the dependencies were read from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lock_files: Vec<String>,
}
