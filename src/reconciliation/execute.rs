use super::environments::reconcile_environments;
use super::properties::reconcile_properties;
use super::types::{ContainerMessage, ReconciliationResult};
use super::{ReconcileContext, ReconcileError, ReconcileOptions};
use crate::container::{validate_containers, ContainerSpec};
use crate::utils::ENV_FILE;
use std::path::Path;
use tracing::{debug, info};

/// Reconcile every container under `base_directory`.
///
/// The containers are validated and the base directory checked before any
/// file is touched. After that an I/O error aborts the run; files already
/// written for earlier containers stay in place and the next run picks up
/// from there.
pub async fn execute_reconciliation(
    base_directory: &Path,
    containers: &[ContainerSpec],
    options: &ReconcileOptions,
) -> Result<ReconciliationResult, ReconcileError> {
    validate_containers(containers)?;
    let ctx = ReconcileContext::new(base_directory, options)?;

    let mut result = ReconciliationResult {
        check_mode: ctx.check_mode,
        ..Default::default()
    };

    for container in containers {
        let mut written = Vec::new();

        if reconcile_environments(&ctx, container).await? {
            written.push(ENV_FILE.to_string());
        }
        written.extend(reconcile_properties(&ctx, container).await?);

        let changed = !written.is_empty();
        if changed {
            let message = ContainerMessage::new(&container.name, written);
            info!(container = %container.name, "{}", message.state());
            result.msg.push(message);
        } else {
            debug!(container = %container.name, "Container files up to date");
        }

        result.container_data.push(container.to_container_data(changed));
    }

    result.changed = !result.msg.is_empty();

    info!(
        containers = containers.len(),
        changed = result.msg.len(),
        check_mode = ctx.check_mode,
        "Reconciliation finished"
    );

    Ok(result)
}
