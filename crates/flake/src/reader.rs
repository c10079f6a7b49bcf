//! Access to the lock file that sits next to a package file

use crate::error::FlakeLockError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads local files on behalf of extraction
#[async_trait]
pub trait LockFileReader: Send + Sync {
    /// Read `path` as UTF-8 text.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    async fn read_local_file(&self, path: &Path) -> Result<Option<String>, FlakeLockError>;
}

/// Reads from the local filesystem with `tokio::fs`
#[derive(Debug, Default, Clone)]
pub struct FsReader {
    base: Option<PathBuf>,
}

impl FsReader {
    /// Reader resolving relative paths against the current directory
    #[must_use]
    pub const fn new() -> Self {
        Self { base: None }
    }

    /// Reader resolving relative paths against `base`
    #[must_use]
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl LockFileReader for FsReader {
    async fn read_local_file(&self, path: &Path) -> Result<Option<String>, FlakeLockError> {
        let full = self.resolve(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FlakeLockError::io(full, e.to_string())),
        }
    }
}

/// Path of `file_name` in the same directory as `package_file`
#[must_use]
pub fn sibling_file_name(package_file: &Path, file_name: &str) -> PathBuf {
    package_file
        .parent()
        .map_or_else(|| PathBuf::from(file_name), |dir| dir.join(file_name))
}
