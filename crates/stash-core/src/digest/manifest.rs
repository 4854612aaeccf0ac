//! Manifest model types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Digest of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// File name relative to the digested directory
    pub name: String,
    /// Lowercase hex MD5 of the file bytes (32 chars)
    pub digest: String,
}

/// Mapping of file name to content digest for one directory
///
/// Serialized as a flat JSON object, `{"plugin.lua": "<md5>", ...}`.
/// Keys are kept sorted so the same snapshot always serializes to the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    files: BTreeMap<String, String>,
}

impl Manifest {
    /// Create an empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file digest, replacing any previous entry with the same name
    pub fn insert(&mut self, file: FileDigest) {
        self.files.insert(file.name, file.digest);
    }

    /// Look up the digest recorded for a file name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over `(name, digest)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to the compact JSON document served to clients
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl FromIterator<FileDigest> for Manifest {
    fn from_iter<I: IntoIterator<Item = FileDigest>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for file in iter {
            manifest.insert(file);
        }
        manifest
    }
}
