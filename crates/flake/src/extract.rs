//! Extraction entrypoints
//!
//! Both modes run the same pipeline: validate the lock graph, walk the
//! updatable nodes, classify each one and assemble the result. A lock graph
//! that yields no records is reported as `None`, never as an error.

use crate::classify::classify;
use crate::config::ExtractConfig;
use crate::dependency::{PackageDependency, PackageFileContent};
use crate::error::FlakeLockError;
use crate::lock::{FlakeLock, SUPPORTED_VERSION};
use crate::manager::LOCK_FILE_NAME;
use crate::observer::{EventKind, ExtractEvent, ExtractObserver};
use crate::reader::{LockFileReader, sibling_file_name};
use crate::walker::walk;
use serde_json::Value;
use std::path::Path;

/// Extract dependencies from the `flake.lock` next to `package_file`.
///
/// Returns `None` when the lock file is absent, unreadable, invalid, or has
/// no updatable inputs.
pub async fn extract_package_file(
    package_file: &Path,
    reader: &dyn LockFileReader,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<PackageFileContent> {
    let lock_path = sibling_file_name(package_file, LOCK_FILE_NAME);
    let lock_file = lock_path.to_string_lossy().into_owned();
    start(observer, format!("nix.extract_package_file({lock_file})"));

    let lock = match reader.read_local_file(&lock_path).await {
        Ok(Some(content)) => validate_text(&content, config, observer),
        Ok(None) => None,
        Err(e) => {
            report(&e, observer);
            None
        }
    };
    let deps = run(lock.as_ref(), config, observer, &lock_file);
    assemble(deps, vec![lock_file])
}

/// Extract dependencies from lock graph text passed in directly.
pub fn extract_inline(
    content: &str,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<PackageFileContent> {
    start(observer, "nix.extract_inline()");
    let lock = validate_text(content, config, observer);
    assemble(run(lock.as_ref(), config, observer, "<inline>"), Vec::new())
}

/// Extract dependencies from an already-deserialized JSON value.
pub fn extract_value(
    value: Value,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<PackageFileContent> {
    start(observer, "nix.extract_value()");
    let lock = validate_value(value, config, observer);
    assemble(run(lock.as_ref(), config, observer, "<value>"), Vec::new())
}

/// Walk and classify a validated lock graph.
#[must_use]
pub fn extract_lock(
    lock: &FlakeLock,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Vec<PackageDependency> {
    walk(lock, observer)
        .iter()
        .filter_map(|input| classify(input, config, observer))
        .collect()
}

/// Wrap records in the result envelope; empty means "no dependencies".
#[must_use]
pub fn assemble(
    deps: Vec<PackageDependency>,
    lock_files: Vec<String>,
) -> Option<PackageFileContent> {
    if deps.is_empty() {
        return None;
    }
    Some(PackageFileContent { deps, lock_files })
}

/// Extract from `lock` if validation produced one, then emit the exit event.
fn run(
    lock: Option<&FlakeLock>,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
    lock_file: &str,
) -> Vec<PackageDependency> {
    let deps = lock.map_or_else(Vec::new, |lock| extract_lock(lock, config, observer));
    observer.observe(ExtractEvent::file(
        EventKind::Finished,
        format!("nix extraction of {lock_file} found {} dependencies", deps.len()),
    ));
    deps
}

fn start(observer: &dyn ExtractObserver, message: impl Into<String>) {
    observer.observe(ExtractEvent::file(EventKind::Started, message));
}

fn validate_text(
    content: &str,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<FlakeLock> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => validate_value(value, config, observer),
        Err(e) => {
            report(&FlakeLockError::parse(e.to_string()), observer);
            None
        }
    }
}

fn validate_value(
    value: Value,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<FlakeLock> {
    if config.enforce_version
        && let Some(found) = FlakeLock::peek_version(&value)
        && found != SUPPORTED_VERSION
    {
        report(
            &FlakeLockError::unsupported_version(found, SUPPORTED_VERSION),
            observer,
        );
        return None;
    }

    match FlakeLock::from_value(value) {
        Ok(lock) => Some(lock),
        Err(e) => {
            report(&e, observer);
            None
        }
    }
}

fn report(error: &FlakeLockError, observer: &dyn ExtractObserver) {
    let kind = match error {
        FlakeLockError::UnsupportedVersion { .. } => EventKind::UnsupportedVersion,
        FlakeLockError::IoError { .. } => EventKind::UnreadableLockFile,
        FlakeLockError::ParseError(_)
        | FlakeLockError::Validation { .. }
        | FlakeLockError::ConfigError { .. } => EventKind::InvalidLockFile,
    };
    observer.observe(ExtractEvent::file(kind, error.to_string()));
}
