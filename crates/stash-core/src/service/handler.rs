//! Manifest request handling

use std::path::PathBuf;

use tracing::{debug, error};

use super::{CollectionId, ServiceConfig};
use crate::cache::{CacheError, ManifestCache, ManifestDocument};
use crate::digest::DigestError;

/// Body served for any collection that cannot be resolved
pub const INVALID_COLLECTION_BODY: &[u8] = br#"["Invalid plugin"]"#;

/// Outcome of a manifest request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestResponse {
    Manifest(ManifestDocument),
    InvalidCollection,
}

impl ManifestResponse {
    /// JSON body for this outcome
    #[must_use]
    pub fn body(&self) -> &[u8] {
        match self {
            Self::Manifest(document) => document.as_bytes(),
            Self::InvalidCollection => INVALID_COLLECTION_BODY,
        }
    }

    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        match self {
            Self::Manifest(document) => document.into_bytes(),
            Self::InvalidCollection => INVALID_COLLECTION_BODY.to_vec(),
        }
    }
}

/// Serves manifests for collections below a document root
#[derive(Debug, Clone)]
pub struct ManifestService {
    config: ServiceConfig,
    cache: ManifestCache,
}

impl ManifestService {
    #[must_use]
    pub fn new(config: ServiceConfig, cache: ManifestCache) -> Self {
        Self { config, cache }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Directory holding the release tree of `collection`
    #[must_use]
    pub fn resolve(&self, collection: &CollectionId) -> PathBuf {
        self.config
            .document_root
            .join(collection.as_str())
            .join(&self.config.head_dir)
    }

    /// Handle a manifest request for the raw `plugin` parameter
    ///
    /// Never fails: a missing or malformed id, a missing directory and any
    /// digest error all produce [`ManifestResponse::InvalidCollection`].
    /// Performs blocking filesystem I/O.
    #[must_use]
    pub fn handle(&self, raw_collection: Option<&str>) -> ManifestResponse {
        let Some(raw) = raw_collection else {
            debug!("Manifest request without a collection id");
            return ManifestResponse::InvalidCollection;
        };

        let collection = match CollectionId::parse(raw, &self.config.collection_prefix) {
            Ok(collection) => collection,
            Err(e) => {
                debug!("{}", e);
                return ManifestResponse::InvalidCollection;
            }
        };

        let dir = self.resolve(&collection);
        if !dir.is_dir() {
            debug!("No release tree for {} at {}", collection, dir.display());
            return ManifestResponse::InvalidCollection;
        }

        match self.cache.get_manifest(&dir) {
            Ok(document) => ManifestResponse::Manifest(document),
            Err(CacheError::Digest(DigestError::DirectoryNotFound(path))) => {
                debug!("No release tree for {} at {}", collection, path.display());
                ManifestResponse::InvalidCollection
            }
            Err(e) => {
                error!("Failed to build manifest for {}: {}", collection, e);
                ManifestResponse::InvalidCollection
            }
        }
    }
}
