use super::target::{ensure_container_dir, reconcile_file};
use super::{ReconcileContext, ReconcileError};
use crate::container::ContainerSpec;
use crate::fingerprint::remove;
use crate::template::FormatKind;
use tracing::info;

/// Reconcile all property files of a container.
///
/// Targets are processed in the order given by
/// [`ContainerSpec::property_targets`]. A target with an empty mapping is
/// removed from disk together with its checksum file and never counts as a
/// change.
///
/// Returns the names of the files that were written, in processing order.
pub async fn reconcile_properties(
    ctx: &ReconcileContext,
    container: &ContainerSpec,
) -> Result<Vec<String>, ReconcileError> {
    let container_path = ensure_container_dir(ctx, &container.name).await?;
    let mut written = Vec::new();

    for target in container.property_targets() {
        let data_file = container_path.join(&target.file_name);

        if target.properties.is_empty() {
            if ctx.check_mode {
                if data_file.exists() {
                    info!(file = %data_file.display(), "Would remove empty property file");
                }
            } else if remove(&data_file).await? {
                info!(file = %data_file.display(), "Removed empty property file");
            }
            continue;
        }

        if reconcile_file(ctx, FormatKind::Properties, &data_file, target.properties).await? {
            written.push(target.file_name);
        }
    }

    Ok(written)
}
