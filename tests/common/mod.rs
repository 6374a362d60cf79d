#![allow(dead_code)]

use container_env::{ContainerSpec, Mapping};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary base directory for a test
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

/// Build a mapping from key/value pairs
pub fn mapping(pairs: &[(&str, &str)]) -> Mapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse a container list from JSON
pub fn containers(value: Value) -> Vec<ContainerSpec> {
    serde_json::from_value(value).expect("Should parse containers")
}

/// Read a file below the base directory
pub async fn read(base: &Path, relative: &str) -> String {
    tokio::fs::read_to_string(base.join(relative))
        .await
        .unwrap_or_else(|e| panic!("Should read {}: {}", relative, e))
}
