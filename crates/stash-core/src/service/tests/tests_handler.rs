//! Tests for manifest request handling

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::cache::{DocumentSource, FsArtifactStore, ManifestCache, MANIFEST_FILE_NAME};
use crate::service::{
    CollectionId, ManifestResponse, ManifestService, ServiceConfig, INVALID_COLLECTION_BODY,
};

const STASH: &str = "net.kyl191.lightroom.export.stash";
const MD5_X: &str = "9dd4e461268c8034f5c8564e155c67a6";

fn service(root: &Path) -> ManifestService {
    ManifestService::new(
        ServiceConfig::new(root),
        ManifestCache::new(Arc::new(FsArtifactStore::new())),
    )
}

fn create_head(root: &Path, collection: &str) -> std::path::PathBuf {
    let head = root.join(collection).join("head");
    fs::create_dir_all(&head).expect("Failed to create head dir");
    fs::write(head.join("plugin.lua"), b"x").expect("Failed to write file");
    fs::write(head.join("info.json"), b"{}").expect("Failed to write file");
    head
}

#[test]
fn test_resolve_joins_root_collection_and_head() {
    let service = service(Path::new("/srv/www"));
    let id = CollectionId::parse(STASH, "net.kyl191.lightroom").expect("Should be valid");

    assert_eq!(
        service.resolve(&id),
        Path::new("/srv/www/net.kyl191.lightroom.export.stash/head")
    );
}

#[test]
fn test_valid_collection_returns_and_persists_manifest() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let head = create_head(root.path(), STASH);

    let response = service(root.path()).handle(Some(STASH));

    let expected = format!(r#"{{"plugin.lua":"{MD5_X}"}}"#);
    assert_eq!(response.body(), expected.as_bytes());
    let on_disk = fs::read(head.join(MANIFEST_FILE_NAME)).expect("Failed to read artifact");
    assert_eq!(on_disk, expected.into_bytes());
}

#[test]
fn test_repeated_requests_are_byte_identical() {
    let root = TempDir::new().expect("Failed to create temp dir");
    create_head(root.path(), STASH);
    let service = service(root.path());

    let first = service.handle(Some(STASH));
    let second = service.handle(Some(STASH));

    assert_eq!(first.body(), second.body());
    match second {
        ManifestResponse::Manifest(document) => {
            assert_eq!(document.source(), DocumentSource::Cached);
        }
        ManifestResponse::InvalidCollection => panic!("expected a manifest"),
    }
}

#[test]
fn test_missing_parameter_is_invalid() {
    let root = TempDir::new().expect("Failed to create temp dir");

    let response = service(root.path()).handle(None);

    assert_eq!(response, ManifestResponse::InvalidCollection);
    assert_eq!(response.body(), INVALID_COLLECTION_BODY);
}

#[test]
fn test_wrong_prefix_is_invalid_and_leaves_filesystem_alone() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let head = create_head(root.path(), "com.example.plugin");

    let response = service(root.path()).handle(Some("com.example.plugin"));

    assert_eq!(response, ManifestResponse::InvalidCollection);
    assert!(!head.join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn test_missing_directory_matches_invalid_payload() {
    let root = TempDir::new().expect("Failed to create temp dir");

    let missing = service(root.path()).handle(Some(STASH));
    let invalid = service(root.path()).handle(Some("bogus"));

    assert_eq!(missing.body(), invalid.body());
    assert_eq!(missing.into_body(), br#"["Invalid plugin"]"#.to_vec());
}

#[test]
fn test_collection_without_head_dir_is_invalid() {
    let root = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(root.path().join(STASH)).expect("Failed to create dir");

    let response = service(root.path()).handle(Some(STASH));

    assert_eq!(response, ManifestResponse::InvalidCollection);
}

#[test]
fn test_traversal_attempt_is_invalid() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let docroot = root.path().join("www");
    fs::create_dir_all(&docroot).expect("Failed to create dir");
    create_head(root.path(), "outside");

    let response = service(&docroot).handle(Some("net.kyl191.lightroom/../../outside"));

    assert_eq!(response, ManifestResponse::InvalidCollection);
}

#[test]
fn test_custom_head_dir() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let stable = root.path().join(STASH).join("stable");
    fs::create_dir_all(&stable).expect("Failed to create dir");
    fs::write(stable.join("plugin.lua"), b"x").expect("Failed to write file");
    let service = ManifestService::new(
        ServiceConfig::new(root.path()).with_head_dir("stable"),
        ManifestCache::new(Arc::new(FsArtifactStore::new())),
    );

    let response = service.handle(Some(STASH));

    assert_eq!(
        response.body(),
        format!(r#"{{"plugin.lua":"{MD5_X}"}}"#).as_bytes()
    );
}
