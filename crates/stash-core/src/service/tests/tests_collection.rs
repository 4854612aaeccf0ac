//! Tests for collection id validation

#![allow(clippy::expect_used)]

use rstest::rstest;

use crate::service::{CollectionId, InvalidCollection, DEFAULT_COLLECTION_PREFIX};

#[rstest]
#[case("net.kyl191.lightroom")]
#[case("net.kyl191.lightroom.export.stash")]
#[case("NET.KYL191.LIGHTROOM.export.stash")]
#[case("Net.Kyl191.Lightroom.publish.flickr")]
#[case("net.kyl191.lightroomX")]
fn test_parse_accepts_prefixed_ids(#[case] raw: &str) {
    let id = CollectionId::parse(raw, DEFAULT_COLLECTION_PREFIX).expect("Should be valid");

    assert_eq!(id.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("net.kyl191")]
#[case("net.kyl191.lightroo")]
#[case("com.example.plugin")]
#[case(" net.kyl191.lightroom")]
#[case("org.kyl191.lightroom.export.stash")]
fn test_parse_rejects_wrong_prefix(#[case] raw: &str) {
    let result = CollectionId::parse(raw, DEFAULT_COLLECTION_PREFIX);

    assert_eq!(result, Err(InvalidCollection(raw.to_string())));
}

#[rstest]
#[case("net.kyl191.lightroom/../../etc")]
#[case("net.kyl191.lightroom.export.stash/head")]
#[case("net.kyl191.lightroom\\..\\secrets")]
#[case("net.kyl191.lightroom\0")]
fn test_parse_rejects_path_escapes(#[case] raw: &str) {
    assert!(CollectionId::parse(raw, DEFAULT_COLLECTION_PREFIX).is_err());
}

#[test]
fn test_parse_rejects_dot_components_with_empty_prefix() {
    assert!(CollectionId::parse(".", "").is_err());
    assert!(CollectionId::parse("..", "").is_err());
    assert!(CollectionId::parse("anything", "").is_ok());
}

#[test]
fn test_parse_multibyte_input_does_not_panic() {
    assert!(CollectionId::parse("日本語", DEFAULT_COLLECTION_PREFIX).is_err());
    assert!(CollectionId::parse("net.kyl191.lightroom.日本語", DEFAULT_COLLECTION_PREFIX).is_ok());
}

#[test]
fn test_display_matches_raw() {
    let id = CollectionId::parse("net.kyl191.lightroom.export.stash", DEFAULT_COLLECTION_PREFIX)
        .expect("Should be valid");

    assert_eq!(id.to_string(), "net.kyl191.lightroom.export.stash");
}
