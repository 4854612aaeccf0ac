//! stash-core: Core library for the stash plugin update endpoint
//!
//! Computes per-file MD5 manifests for a plugin's `head` release tree,
//! caches them beside the tree, and records install telemetry in Neo4j.
//!
//! # Components
//!
//! - **digest** - MD5 digests for every eligible file in a directory
//! - **cache** - get-or-compute manifest cache over a pluggable artifact store
//! - **service** - collection validation and request-level orchestration
//! - **telemetry** - payload parsing, identity derivation and the sink trait
//! - **graph** - Neo4j client used as the telemetry store

pub mod cache;
pub mod digest;
pub mod graph;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use cache::{
    ArtifactStore, FsArtifactStore, ManifestCache, ManifestDocument, MemoryArtifactStore,
};
pub use digest::{compute_manifest, digest_file, FileDigest, Manifest};
pub use graph::neo4j::{Neo4jClient, Neo4jConfig};
pub use service::{CollectionId, ManifestResponse, ManifestService, ServiceConfig};
pub use telemetry::{InstallRecord, TelemetryPayload, TelemetrySink};
