//! Reconciliation of desired container files against what is on disk.
//!
//! Each container gets its `container.env` and property files compared
//! against their checksum sidecars; only files whose fingerprint changed are
//! rewritten. Containers and their files are processed strictly in input
//! order.

mod environments;
mod execute;
mod properties;
mod target;
mod types;

pub use environments::reconcile_environments;
pub use execute::execute_reconciliation;
pub use properties::reconcile_properties;
pub use types::{ContainerMessage, ReconciliationResult, WRITTEN_SUFFIX};

use crate::permissions::{FileAttributes, ResolvedAttributes};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Fingerprint error: {0}")]
    FingerprintError(#[from] crate::fingerprint::FingerprintError),

    #[error("Invalid container: {0}")]
    ContainerError(#[from] crate::container::ContainerError),

    #[error("Permission error: {0}")]
    PermissionError(#[from] crate::permissions::PermissionError),

    #[error("Base directory not found: {0}")]
    BaseDirectoryNotFound(String),
}

/// Options of one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Ownership and mode applied to every written file
    pub attributes: FileAttributes,
    /// Compare only, never touch the filesystem
    pub check_mode: bool,
}

/// Everything a run needs besides the containers themselves
#[derive(Debug, Clone)]
pub struct ReconcileContext {
    pub base_directory: PathBuf,
    pub attributes: ResolvedAttributes,
    pub check_mode: bool,
}

impl ReconcileContext {
    /// Check the base directory and resolve the file attributes.
    ///
    /// Fails before anything is written if either is unusable.
    pub fn new(base_directory: &Path, options: &ReconcileOptions) -> Result<Self, ReconcileError> {
        if !base_directory.is_dir() {
            return Err(ReconcileError::BaseDirectoryNotFound(
                base_directory.display().to_string(),
            ));
        }

        Ok(Self {
            base_directory: base_directory.to_path_buf(),
            attributes: options.attributes.resolve()?,
            check_mode: options.check_mode,
        })
    }
}
