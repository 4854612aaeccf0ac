//! Artifact storage backends for the manifest cache

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::Builder;

use super::CacheError;

/// File name of the persisted manifest artifact
pub const MANIFEST_FILE_NAME: &str = "md5sums.json";

/// Result of a store attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// This call created the artifact
    Written,
    /// Another writer created the artifact first; it was left untouched
    AlreadyPresent,
}

/// Storage backend for manifest artifacts, keyed by the directory they describe
pub trait ArtifactStore: Send + Sync {
    /// Load the stored artifact for `dir`, or `None` if there is none
    ///
    /// # Errors
    /// Returns an error if an artifact exists but cannot be read.
    fn load(&self, dir: &Path) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `document` as the artifact for `dir` unless one already exists
    ///
    /// Implementations must never expose a partially written artifact to
    /// `load`, and must never replace an existing one.
    ///
    /// # Errors
    /// Returns an error if the artifact cannot be written.
    fn store(&self, dir: &Path, document: &[u8]) -> Result<StoreOutcome, CacheError>;
}

/// Stores artifacts as a file inside the described directory
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    file_name: String,
}

impl FsArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: MANIFEST_FILE_NAME.to_string(),
        }
    }

    /// Use a different artifact file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Path of the artifact for `dir`
    #[must_use]
    pub fn artifact_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

impl Default for FsArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStore for FsArtifactStore {
    fn load(&self, dir: &Path) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.artifact_path(dir);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    fn store(&self, dir: &Path, document: &[u8]) -> Result<StoreOutcome, CacheError> {
        let path = self.artifact_path(dir);
        let io_err = |source| CacheError::Io {
            path: path.clone(),
            source,
        };

        // The temp name must end in the manifest extension so a concurrent
        // listing of `dir` never digests it.
        let mut tmp = Builder::new()
            .prefix(".md5sums-")
            .suffix(".tmp.json")
            .tempfile_in(dir)
            .map_err(io_err)?;
        tmp.write_all(document).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(StoreOutcome::Written),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Ok(StoreOutcome::AlreadyPresent)
            }
            Err(e) => Err(io_err(e.error)),
        }
    }
}

/// Keeps artifacts in process memory
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an artifact is stored for `dir`
    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(dir)
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn load(&self, dir: &Path) -> Result<Option<Vec<u8>>, CacheError> {
        let artifacts = self.artifacts.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(artifacts.get(dir).cloned())
    }

    fn store(&self, dir: &Path, document: &[u8]) -> Result<StoreOutcome, CacheError> {
        let mut artifacts = self.artifacts.lock().unwrap_or_else(PoisonError::into_inner);
        match artifacts.entry(dir.to_path_buf()) {
            Entry::Occupied(_) => Ok(StoreOutcome::AlreadyPresent),
            Entry::Vacant(slot) => {
                slot.insert(document.to_vec());
                Ok(StoreOutcome::Written)
            }
        }
    }
}
