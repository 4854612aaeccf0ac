//! Cache module: get-or-compute manifest cache
//!
//! A manifest is computed once per collection and persisted beside the
//! directory it describes. Later requests are served the stored bytes
//! verbatim until the artifact is removed externally.

mod manifest_cache;
mod store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::digest::DigestError;

pub use manifest_cache::{DocumentSource, ManifestCache, ManifestDocument};
pub use store::{
    ArtifactStore, FsArtifactStore, MemoryArtifactStore, StoreOutcome, MANIFEST_FILE_NAME,
};

/// Errors that can occur while loading, computing or storing a manifest
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
