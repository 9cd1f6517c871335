// tests/common/mod.rs
// =============================================================================
// Shared helpers for the integration tests.
// =============================================================================

#![allow(dead_code)]

pub mod listing_server;

use std::path::Path;

use uploads_mirror::config::{root_url, MirrorConfig, DEFAULT_ROOT_PREFIX};

/// Sequential, quiet settings rooted at the test server's uploads tree.
pub fn config_for(domain: &str, output: &Path) -> MirrorConfig {
    let root = root_url("http", domain, DEFAULT_ROOT_PREFIX).unwrap();
    let mut config = MirrorConfig::new(root, output);
    config.concurrency = 1;
    config.echo_downloads = false;
    config.current_year = 2026;
    config
}

/// Sorted file names directly inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
