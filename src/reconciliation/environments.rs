use super::target::{ensure_container_dir, reconcile_file};
use super::{ReconcileContext, ReconcileError};
use crate::container::ContainerSpec;
use crate::template::FormatKind;
use crate::utils::ENV_FILE;

/// Reconcile the `container.env` file of a container.
///
/// An empty `environments` mapping still produces a file holding only the
/// header, and takes part in change detection like any other.
///
/// Returns whether the file was written.
pub async fn reconcile_environments(
    ctx: &ReconcileContext,
    container: &ContainerSpec,
) -> Result<bool, ReconcileError> {
    let container_path = ensure_container_dir(ctx, &container.name).await?;
    let data_file = container_path.join(ENV_FILE);

    reconcile_file(ctx, FormatKind::Environments, &data_file, &container.environments).await
}
