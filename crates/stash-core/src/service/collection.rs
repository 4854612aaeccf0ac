//! Collection identifier validation

use std::fmt;

use thiserror::Error;

/// A collection id was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid collection: {0:?}")]
pub struct InvalidCollection(pub String);

/// A validated collection identifier
///
/// Starts with the required prefix (ASCII case-insensitive over exactly
/// the prefix length) and is a single plain path component, so joining it
/// onto the document root can never leave the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionId(String);

impl CollectionId {
    /// Validate `raw` against `prefix` without touching the filesystem
    ///
    /// # Errors
    /// Returns [`InvalidCollection`] if the prefix does not match or the id
    /// is not a plain path component.
    pub fn parse(raw: &str, prefix: &str) -> Result<Self, InvalidCollection> {
        let reject = || InvalidCollection(raw.to_string());

        let head = raw.as_bytes().get(..prefix.len()).ok_or_else(reject)?;
        if !head.eq_ignore_ascii_case(prefix.as_bytes()) {
            return Err(reject());
        }

        if raw == "." || raw == ".." || raw.contains(['/', '\\', '\0']) {
            return Err(reject());
        }

        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
