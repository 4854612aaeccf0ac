//! Directory digest computation

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::{FileDigest, Manifest, MANIFEST_EXTENSION};

/// Errors that can occur while digesting a directory
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether a directory entry name may appear in a manifest
///
/// Rejects the manifest artifact's own extension (ASCII case-insensitive)
/// and any name ending in `.`, which covers the `.` and `..` pseudo-entries.
#[must_use]
pub fn is_eligible_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let ext = MANIFEST_EXTENSION.as_bytes();
    let is_manifest =
        bytes.len() >= ext.len() && bytes[bytes.len() - ext.len()..].eq_ignore_ascii_case(ext);

    !is_manifest && !name.ends_with('.')
}

/// Compute the MD5 digest of a single file
///
/// # Errors
/// Returns [`DigestError::Read`] if the file cannot be opened or read.
pub fn digest_file(path: &Path) -> Result<FileDigest, DigestError> {
    let read_err = |source| DigestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let mut context = md5::Context::new();
    io::copy(&mut reader, &mut context).map_err(read_err)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileDigest {
        name,
        digest: format!("{:x}", context.compute()),
    })
}

/// Compute the manifest for the files directly inside `dir`
///
/// The listing is not recursive. Entries that are not regular files once
/// symlinks are followed (subdirectories, sockets, dangling links) are
/// skipped, as are names that are not valid UTF-8.
///
/// # Errors
/// Returns [`DigestError::DirectoryNotFound`] if `dir` is missing or not a
/// directory, and [`DigestError::Read`] if an eligible file cannot be read.
pub fn compute_manifest(dir: &Path) -> Result<Manifest, DigestError> {
    if !dir.is_dir() {
        return Err(DigestError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| DigestError::List {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut manifest = Manifest::new();

    for entry in entries {
        let entry = entry.map_err(|source| DigestError::List {
            path: dir.to_path_buf(),
            source,
        })?;

        let Ok(name) = entry.file_name().into_string() else {
            warn!("Skipping non UTF-8 entry in {}", dir.display());
            continue;
        };

        if !is_eligible_name(&name) {
            continue;
        }

        let path = entry.path();
        if !fs::metadata(&path).is_ok_and(|m| m.is_file()) {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let file = digest_file(&path)?;
        manifest.insert(FileDigest { name, ..file });
    }

    Ok(manifest)
}
