use super::{ReconcileContext, ReconcileError};
use crate::container::Mapping;
use crate::fingerprint::{has_changed, write};
use crate::template::FormatKind;
use crate::utils::{get_checksum_path, get_container_path};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Make sure the directory of a container exists and return its path.
///
/// Nothing is created in check mode.
pub(super) async fn ensure_container_dir(
    ctx: &ReconcileContext,
    container_name: &str,
) -> Result<PathBuf, ReconcileError> {
    let container_path = get_container_path(&ctx.base_directory, container_name);

    if !ctx.check_mode && !container_path.exists() {
        fs::create_dir_all(&container_path).await?;
        ctx.attributes.apply_to_directory(&container_path).await?;
        info!(
            container = %container_name,
            path = %container_path.display(),
            "Created container directory"
        );
    }

    Ok(container_path)
}

/// Run the fingerprint comparison for one data file and write it on change.
///
/// Returns whether the file was (or in check mode would be) written.
pub(super) async fn reconcile_file(
    ctx: &ReconcileContext,
    kind: FormatKind,
    data_file: &Path,
    mapping: &Mapping,
) -> Result<bool, ReconcileError> {
    let state = has_changed(data_file, mapping, ctx.check_mode).await?;

    if !state.changed {
        return Ok(false);
    }

    if ctx.check_mode {
        info!(file = %data_file.display(), kind = %kind, "Would write file");
        return Ok(true);
    }

    let checksum_file = get_checksum_path(data_file);
    write(kind, mapping, data_file, &state.new_fingerprint, &checksum_file).await?;

    if !ctx.attributes.is_empty() {
        ctx.attributes.apply_to_file(data_file).await?;
        ctx.attributes.apply_to_file(&checksum_file).await?;
    }

    info!(file = %data_file.display(), kind = %kind, entries = mapping.len(), "Wrote file");
    Ok(true)
}
