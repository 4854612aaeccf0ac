//! Get-or-compute manifest cache

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{ArtifactStore, CacheError, StoreOutcome};
use crate::digest::compute_manifest;

/// Where a served manifest document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// Read back from the artifact store
    Cached,
    /// Computed during this request
    Computed,
}

/// Serialized manifest as served to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    bytes: Vec<u8>,
    source: DocumentSource,
}

impl ManifestDocument {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub const fn source(&self) -> DocumentSource {
        self.source
    }
}

/// Manifest cache over an injectable [`ArtifactStore`]
///
/// Stored artifacts are trusted as-is; there is no staleness check. A
/// collection is recomputed only after its artifact has been removed.
#[derive(Clone)]
pub struct ManifestCache {
    store: Arc<dyn ArtifactStore>,
}

impl ManifestCache {
    /// Create a cache backed by the given store
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Return the manifest document for `dir`, computing and storing it on a miss
    ///
    /// A failed store is logged and otherwise ignored: the freshly computed
    /// document is returned either way. Concurrent misses each compute
    /// their own document; only one of them ends up persisted.
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be computed or serialized.
    pub fn get_manifest(&self, dir: &Path) -> Result<ManifestDocument, CacheError> {
        match self.store.load(dir) {
            Ok(Some(bytes)) => {
                debug!("Manifest cache hit for {}", dir.display());
                return Ok(ManifestDocument {
                    bytes,
                    source: DocumentSource::Cached,
                });
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable manifest artifact: {}", e),
        }

        let manifest = compute_manifest(dir)?;
        let bytes = manifest.to_json()?;

        match self.store.store(dir, &bytes) {
            Ok(StoreOutcome::Written) => {
                info!("Cached manifest of {} files for {}", manifest.len(), dir.display());
            }
            Ok(StoreOutcome::AlreadyPresent) => {
                debug!("Manifest for {} was cached concurrently", dir.display());
            }
            Err(e) => warn!("Failed to persist manifest: {}", e),
        }

        Ok(ManifestDocument {
            bytes,
            source: DocumentSource::Computed,
        })
    }
}

impl std::fmt::Debug for ManifestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestCache").finish_non_exhaustive()
    }
}
