//! Fingerprint-and-write: the change detection every rendered file goes
//! through.
//!
//! A data file is accompanied by a `<data_file>.checksum` sidecar holding
//! the digest of the mapping it was rendered from. A file is rewritten only
//! when the digest of the desired mapping differs from the stored one.

mod canonical;

pub use canonical::{to_canonical_string, CanonicalFormatter};

use crate::container::Mapping;
use crate::template::{render, FormatKind};
use crate::utils::{compute_hash, get_checksum_path, read_checksum_file};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Outcome of comparing a mapping against the stored fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeState {
    pub changed: bool,
    pub new_fingerprint: String,
    /// Stored digest, empty when there was no usable sidecar
    pub old_fingerprint: String,
}

/// Compute the fingerprint of a mapping: SHA-256 (hex) of its canonical JSON
pub fn compute_fingerprint(mapping: &Mapping) -> Result<String, FingerprintError> {
    let canonical = to_canonical_string(mapping)?;
    Ok(compute_hash(&canonical))
}

/// Compare a mapping against the sidecar of `data_file`.
///
/// A sidecar without its data file is stale and gets removed first, so a
/// missing data file always counts as changed. With `dry_run` the stale
/// sidecar is left on disk but still ignored.
pub async fn has_changed(
    data_file: &Path,
    mapping: &Mapping,
    dry_run: bool,
) -> Result<ChangeState, FingerprintError> {
    let checksum_file = get_checksum_path(data_file);
    let mut checksum_exists = checksum_file.exists();

    if checksum_exists && !data_file.exists() {
        warn!(
            file = %checksum_file.display(),
            "Checksum file without data file, discarding it"
        );
        if !dry_run {
            fs::remove_file(&checksum_file).await?;
        }
        checksum_exists = false;
    }

    let old_fingerprint = if checksum_exists {
        read_checksum_file(&checksum_file).await?
    } else {
        String::new()
    };

    let new_fingerprint = compute_fingerprint(mapping)?;
    let changed = new_fingerprint != old_fingerprint;

    debug!(
        file = %data_file.display(),
        new = %new_fingerprint,
        old = %old_fingerprint,
        changed,
        "Compared fingerprints"
    );

    Ok(ChangeState {
        changed,
        new_fingerprint,
        old_fingerprint,
    })
}

/// Render `mapping` into `data_file`, then store `fingerprint` in `checksum_file`.
///
/// Both files are overwritten in place. A failure between the two writes
/// leaves an outdated sidecar behind, which the next run detects as a change.
pub async fn write(
    kind: FormatKind,
    mapping: &Mapping,
    data_file: &Path,
    fingerprint: &str,
    checksum_file: &Path,
) -> Result<(), FingerprintError> {
    let content = render(kind, mapping);
    fs::write(data_file, content).await?;
    fs::write(checksum_file, fingerprint).await?;
    Ok(())
}

/// Remove a data file and its sidecar if present.
///
/// Returns true if anything was removed.
pub async fn remove(data_file: &Path) -> Result<bool, FingerprintError> {
    let checksum_file = get_checksum_path(data_file);
    let mut removed = false;

    for path in [data_file, checksum_file.as_path()] {
        if path.exists() {
            fs::remove_file(path).await?;
            removed = true;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_compute_fingerprint_matches_reference_digest() {
        let fingerprint = compute_fingerprint(&mapping(&[("A", "1"), ("B", "2")])).unwrap();
        assert_eq!(
            fingerprint,
            "733a0eb7f3123075fb9798f9a13d1ab8c6758c95448595de8b56d6a79139c766"
        );
    }

    #[test]
    fn test_compute_fingerprint_empty_mapping() {
        assert_eq!(
            compute_fingerprint(&Mapping::new()).unwrap(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_compute_fingerprint_non_ascii() {
        assert_eq!(
            compute_fingerprint(&mapping(&[("KEY", "wert ü")])).unwrap(),
            "73f407507667c4e35465d1272c08a0375d7f42c2658438bc85a9d4197be262b0"
        );
    }

    #[test]
    fn test_compute_fingerprint_order_independent() {
        let forward = mapping(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let backward = mapping(&[("c", "3"), ("b", "2"), ("a", "1")]);
        assert_eq!(
            compute_fingerprint(&forward).unwrap(),
            compute_fingerprint(&backward).unwrap()
        );
    }

    #[test]
    fn test_compute_fingerprint_detects_differences() {
        let base = compute_fingerprint(&mapping(&[("a", "1"), ("b", "2")])).unwrap();
        let value = compute_fingerprint(&mapping(&[("a", "1"), ("b", "3")])).unwrap();
        let added = compute_fingerprint(&mapping(&[("a", "1"), ("b", "2"), ("c", "")])).unwrap();
        let removed = compute_fingerprint(&mapping(&[("a", "1")])).unwrap();

        assert_ne!(base, value);
        assert_ne!(base, added);
        assert_ne!(base, removed);
    }

    #[tokio::test]
    async fn test_has_changed_without_prior_state() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("container.env");

        let state = has_changed(&data_file, &mapping(&[("A", "1")]), false)
            .await
            .unwrap();

        assert!(state.changed);
        assert_eq!(state.old_fingerprint, "");
        assert_eq!(state.new_fingerprint.len(), 64);
    }

    #[tokio::test]
    async fn test_write_then_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("container.env");
        let checksum_file = get_checksum_path(&data_file);
        let data = mapping(&[("A", "1")]);

        let state = has_changed(&data_file, &data, false).await.unwrap();
        write(
            FormatKind::Environments,
            &data,
            &data_file,
            &state.new_fingerprint,
            &checksum_file,
        )
        .await
        .unwrap();

        assert_eq!(
            fs::read_to_string(&data_file).await.unwrap(),
            "# generated by ansible\nA=1\n\n"
        );
        assert_eq!(
            fs::read_to_string(&checksum_file).await.unwrap(),
            state.new_fingerprint
        );

        let again = has_changed(&data_file, &data, false).await.unwrap();
        assert!(!again.changed);
        assert_eq!(again.old_fingerprint, state.new_fingerprint);
    }

    #[tokio::test]
    async fn test_has_changed_removes_stale_sidecar() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("container.env");
        let checksum_file = get_checksum_path(&data_file);
        let data = mapping(&[("A", "1")]);

        let fingerprint = compute_fingerprint(&data).unwrap();
        fs::write(&checksum_file, &fingerprint).await.unwrap();

        let state = has_changed(&data_file, &data, false).await.unwrap();

        assert!(state.changed);
        assert_eq!(state.old_fingerprint, "");
        assert!(!checksum_file.exists());
    }

    #[tokio::test]
    async fn test_has_changed_dry_run_keeps_stale_sidecar() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("container.env");
        let checksum_file = get_checksum_path(&data_file);
        let data = mapping(&[("A", "1")]);

        fs::write(&checksum_file, compute_fingerprint(&data).unwrap())
            .await
            .unwrap();

        let state = has_changed(&data_file, &data, true).await.unwrap();

        assert!(state.changed);
        assert!(checksum_file.exists());
    }

    #[tokio::test]
    async fn test_has_changed_empty_sidecar_forces_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("container.env");
        fs::write(&data_file, "# generated by ansible\n\n").await.unwrap();
        fs::write(get_checksum_path(&data_file), "").await.unwrap();

        let state = has_changed(&data_file, &Mapping::new(), false).await.unwrap();

        assert!(state.changed);
        assert_eq!(state.old_fingerprint, "");
    }

    #[tokio::test]
    async fn test_remove_deletes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("web.properties");
        let checksum_file = get_checksum_path(&data_file);
        fs::write(&data_file, "x").await.unwrap();
        fs::write(&checksum_file, "y").await.unwrap();

        assert!(remove(&data_file).await.unwrap());
        assert!(!data_file.exists());
        assert!(!checksum_file.exists());

        assert!(!remove(&data_file).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_missing_parent_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("missing").join("container.env");
        let checksum_file = get_checksum_path(&data_file);

        let result = write(
            FormatKind::Environments,
            &Mapping::new(),
            &data_file,
            "digest",
            &checksum_file,
        )
        .await;

        assert!(matches!(result, Err(FingerprintError::IoError(_))));
    }
}
