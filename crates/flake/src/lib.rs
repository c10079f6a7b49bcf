//! Nix flake.lock dependency extraction
//!
//! This crate turns a `flake.lock` graph into the list of inputs that an
//! update tool can bump:
//! - Validate the lock graph (format version 7)
//! - Walk the direct inputs of the root node, skipping placeholders and
//!   indirect registry references
//! - Classify each input by provider into a git-refs dependency record
//!
//! # Example
//!
//! ```
//! use flakedeps_flake::{ExtractConfig, NoopObserver, extract_inline};
//!
//! let lock = r#"{
//!     "nodes": {
//!         "nixpkgs": {
//!             "locked": {
//!                 "type": "github", "owner": "NixOS", "repo": "nixpkgs",
//!                 "rev": "abc123", "narHash": "sha256-x", "revCount": 1, "lastModified": 1
//!             },
//!             "original": { "type": "github", "owner": "NixOS", "repo": "nixpkgs", "ref": "nixos-unstable" }
//!         },
//!         "root": { "inputs": { "nixpkgs": "nixpkgs" } }
//!     },
//!     "root": "root",
//!     "version": 7
//! }"#;
//!
//! let content = extract_inline(lock, &ExtractConfig::inline(), &NoopObserver).unwrap();
//! assert_eq!(content.deps[0].package_name, "https://github.com/NixOS/nixpkgs");
//! ```

mod classify;
mod config;
mod dependency;
mod error;
mod extract;
mod lock;
pub mod manager;
mod observer;
mod reader;
mod walker;

pub use classify::{canonical_host, classify, tarball_repository_url};
pub use config::{ConfigOverrides, ExtractConfig};
pub use dependency::{GIT_REFS_DATASOURCE, PackageDependency, PackageFileContent};
pub use error::FlakeLockError;
pub use extract::{assemble, extract_inline, extract_lock, extract_package_file, extract_value};
pub use lock::{
    FlakeLock, FlakeNode, InputRef, InputType, LockedInput, OriginalInput, SUPPORTED_VERSION,
};
pub use observer::{
    CollectingObserver, EventKind, ExtractEvent, ExtractObserver, NoopObserver, Severity,
    TracingObserver,
};
pub use reader::{FsReader, LockFileReader, sibling_file_name};
pub use walker::{WalkedInput, walk};
