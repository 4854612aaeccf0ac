//! Service module: request-level manifest orchestration
//!
//! Validates the requested collection, resolves it under the document
//! root and asks the manifest cache for its document. Every failure is
//! folded into a single invalid-collection response.

mod collection;
mod config;
mod handler;

pub use collection::{CollectionId, InvalidCollection};
pub use config::{ServiceConfig, DEFAULT_COLLECTION_PREFIX, DEFAULT_HEAD_DIR};
pub use handler::{ManifestResponse, ManifestService, INVALID_COLLECTION_BODY};

#[cfg(test)]
mod tests;
