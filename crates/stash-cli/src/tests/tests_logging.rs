//! Tests for logging setup
//!
//! The global subscriber can only be installed once per process, so these
//! exercise the filter selection rather than `setup_logging` itself.

use tracing_subscriber::{fmt, prelude::*};

use crate::logging::env_filter;

#[test]
fn test_default_filter_is_info() {
    let directives = env_filter(false).to_string().to_lowercase();

    assert!(directives.contains("info"), "got: {directives}");
    assert!(!directives.contains("debug"), "got: {directives}");
}

#[test]
fn test_verbose_filter_is_debug() {
    let directives = env_filter(true).to_string().to_lowercase();

    assert!(directives.contains("debug"), "got: {directives}");
}

#[test]
fn test_filter_composes_with_fmt_layer() {
    let _subscriber = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter(true));
}
