//! Tests for ServiceConfig

use std::path::PathBuf;

use crate::service::{ServiceConfig, DEFAULT_COLLECTION_PREFIX, DEFAULT_HEAD_DIR};

#[test]
fn test_new_uses_defaults() {
    let config = ServiceConfig::new("/srv/www");

    assert_eq!(config.document_root, PathBuf::from("/srv/www"));
    assert_eq!(config.collection_prefix, DEFAULT_COLLECTION_PREFIX);
    assert_eq!(config.head_dir, DEFAULT_HEAD_DIR);
}

#[test]
fn test_builder_overrides() {
    let config = ServiceConfig::new(PathBuf::from("/srv/www"))
        .with_prefix("com.example")
        .with_head_dir("stable");

    assert_eq!(config.collection_prefix, "com.example");
    assert_eq!(config.head_dir, "stable");
}
