//! Digest module: per-file MD5 manifests
//!
//! Lists a single directory level, filters out the manifest artifact
//! itself, and digests every remaining regular file.

mod compute;
mod manifest;

pub use compute::{compute_manifest, digest_file, is_eligible_name, DigestError};
pub use manifest::{FileDigest, Manifest};

/// Extension of the persisted manifest artifact; entries ending in it are never digested.
pub const MANIFEST_EXTENSION: &str = ".json";

#[cfg(test)]
mod tests;
