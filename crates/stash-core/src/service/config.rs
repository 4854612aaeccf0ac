//! Manifest service configuration

use std::path::PathBuf;

/// Collection ids must start with this prefix unless configured otherwise
pub const DEFAULT_COLLECTION_PREFIX: &str = "net.kyl191.lightroom";

/// Sub-directory of a collection that holds the current release tree
pub const DEFAULT_HEAD_DIR: &str = "head";

/// Configuration for the manifest service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub document_root: PathBuf,
    pub collection_prefix: String,
    pub head_dir: String,
}

impl ServiceConfig {
    /// Create a configuration serving collections below `document_root`
    #[must_use]
    pub fn new(document_root: impl Into<PathBuf>) -> Self {
        Self {
            document_root: document_root.into(),
            collection_prefix: DEFAULT_COLLECTION_PREFIX.to_string(),
            head_dir: DEFAULT_HEAD_DIR.to_string(),
        }
    }

    /// Set the required collection id prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collection_prefix = prefix.into();
        self
    }

    /// Set the per-collection release sub-directory
    #[must_use]
    pub fn with_head_dir(mut self, head_dir: impl Into<String>) -> Self {
        self.head_dir = head_dir.into();
        self
    }
}
