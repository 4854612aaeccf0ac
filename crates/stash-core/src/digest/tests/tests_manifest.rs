//! Tests for the manifest model

#![allow(clippy::expect_used)]

use crate::digest::{FileDigest, Manifest};

fn digest(name: &str, digest: &str) -> FileDigest {
    FileDigest {
        name: name.to_string(),
        digest: digest.to_string(),
    }
}

#[test]
fn test_new_manifest_is_empty() {
    let manifest = Manifest::new();

    assert!(manifest.is_empty());
    assert_eq!(manifest.len(), 0);
}

#[test]
fn test_insert_replaces_existing_name() {
    let mut manifest = Manifest::new();
    manifest.insert(digest("plugin.lua", "aaa"));
    manifest.insert(digest("plugin.lua", "bbb"));

    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest.get("plugin.lua"), Some("bbb"));
}

#[test]
fn test_to_json_is_flat_object() {
    let manifest: Manifest = vec![digest("b.lua", "222"), digest("a.lua", "111")]
        .into_iter()
        .collect();

    let json = manifest.to_json().expect("Failed to serialize");

    assert_eq!(json, br#"{"a.lua":"111","b.lua":"222"}"#.to_vec());
}

#[test]
fn test_empty_manifest_serializes_as_object() {
    let json = Manifest::new().to_json().expect("Failed to serialize");

    assert_eq!(json, b"{}".to_vec());
}

#[test]
fn test_json_parses_back_into_same_mapping() {
    let manifest: Manifest = vec![digest("plugin.lua", "9dd4e461268c8034f5c8564e155c67a6")]
        .into_iter()
        .collect();

    let json = manifest.to_json().expect("Failed to serialize");
    let parsed: Manifest = serde_json::from_slice(&json).expect("Failed to parse");

    assert_eq!(parsed, manifest);
}
