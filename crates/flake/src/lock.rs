//! Data structures for the Nix flake.lock v7 format
//!
//! This module provides serde types for the lock graph together with the
//! schema validation that turns raw JSON into a [`FlakeLock`]. Unknown keys
//! are ignored; missing required keys, wrong primitive types and provider
//! types outside [`InputType`] are rejected with a path-qualified diagnostic.

use crate::error::FlakeLockError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The only lock graph format version accepted in strict mode.
pub const SUPPORTED_VERSION: i64 = 7;

/// Nix flake.lock file representation
///
/// The lock file contains a directed graph of flake inputs. The node named
/// by `root` is the synthetic entrypoint whose `inputs` are the declared
/// dependencies of the flake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlakeLock {
    /// Version of the lockfile format
    pub version: i64,

    /// Root node identifier (usually "root")
    pub root: String,

    /// All nodes indexed by name
    pub nodes: BTreeMap<String, FlakeNode>,
}

/// A node in the flake dependency graph
///
/// The root node only carries `inputs`; input nodes carry `locked` and
/// `original`. A node with neither is a placeholder entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlakeNode {
    /// Whether the input is a flake; `false` marks plain sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flake: Option<bool>,

    /// Outgoing edges: input alias to referenced node
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputRef>,

    /// Pinned provider record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<LockedInput>,

    /// Reference as declared in flake.nix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<OriginalInput>,
}

/// Reference to another node
///
/// Either a direct node name, or a "follows" path such as `["nixpkgs"]`
/// that inherits the input from another node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InputRef {
    /// Direct reference to another node by name
    Direct(String),
    /// Follows path through the root's inputs
    Follows(Vec<String>),
}

impl InputRef {
    /// The referenced node name for direct references
    #[must_use]
    pub fn direct(&self) -> Option<&str> {
        match self {
            Self::Direct(name) => Some(name),
            Self::Follows(_) => None,
        }
    }
}

/// Provider kind of a locked or original input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Plain git repository
    Git,
    /// GitHub repository (or GitHub Enterprise with `host`)
    Github,
    /// GitLab repository
    Gitlab,
    /// Registry alias such as `nixpkgs`
    Indirect,
    /// SourceHut repository
    Sourcehut,
    /// HTTP tarball
    Tarball,
}

impl InputType {
    /// The name used in the lock file
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Indirect => "indirect",
            Self::Sourcehut => "sourcehut",
            Self::Tarball => "tarball",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locked (pinned) record of an input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LockedInput {
    /// Provider kind
    #[serde(rename = "type")]
    pub input_type: InputType,

    /// Pinned revision
    pub rev: String,

    /// Content hash, e.g. "sha256-<base64>"
    pub nar_hash: String,

    /// Number of commits up to `rev`
    pub rev_count: i64,

    /// Commit timestamp (Unix epoch)
    pub last_modified: i64,

    /// Custom forge host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Repository owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Branch or tag the revision was taken from
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Source URL (git and tarball)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Original (unpinned) input specification as written in flake.nix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OriginalInput {
    /// Provider kind
    #[serde(rename = "type")]
    pub input_type: InputType,

    /// Custom forge host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Repository owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Branch reference (e.g. "nixos-unstable")
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Source URL (git and tarball)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FlakeLock {
    /// Parse and validate a flake.lock from its JSON text
    ///
    /// # Errors
    /// Returns [`FlakeLockError::ParseError`] for invalid JSON and
    /// [`FlakeLockError::Validation`] when the JSON does not match the schema
    pub fn from_json(json: &str) -> Result<Self, FlakeLockError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| FlakeLockError::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate an already-deserialized JSON value against the schema
    ///
    /// # Errors
    /// Returns [`FlakeLockError::Validation`] on any structural mismatch,
    /// including a `root` that names no node
    pub fn from_value(value: Value) -> Result<Self, FlakeLockError> {
        let lock: Self = serde_path_to_error::deserialize(value)
            .map_err(|e| FlakeLockError::validation(e.to_string()))?;

        if !lock.nodes.contains_key(&lock.root) {
            return Err(FlakeLockError::validation(format!(
                "root: node '{}' is not present in nodes",
                lock.root
            )));
        }

        Ok(lock)
    }

    /// Read the `version` field of an unvalidated value, if it is an integer
    #[must_use]
    pub fn peek_version(value: &Value) -> Option<i64> {
        value.get("version").and_then(Value::as_i64)
    }

    /// Get the root node
    #[must_use]
    pub fn root_node(&self) -> Option<&FlakeNode> {
        self.nodes.get(&self.root)
    }

    /// Get any node by name
    #[must_use]
    pub fn get_node(&self, name: &str) -> Option<&FlakeNode> {
        self.nodes.get(name)
    }

    /// Whether `name` is the target of a direct reference in root's inputs
    #[must_use]
    pub fn is_root_input(&self, name: &str) -> bool {
        self.root_node().is_some_and(|root| {
            root.inputs
                .values()
                .any(|input| input.direct() == Some(name))
        })
    }
}
