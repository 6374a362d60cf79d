pub mod config;
pub mod container;
pub mod fingerprint;
pub mod permissions;
pub mod reconciliation;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use config::{read_request, ConfigError, ReconcileRequest, RequestOverrides};
pub use container::{
    ContainerData, ContainerError, ContainerSpec, Mapping, PropertyFile, PropertyTarget,
};
pub use fingerprint::{compute_fingerprint, has_changed, write, ChangeState, FingerprintError};
pub use permissions::{FileAttributes, PermissionError};
pub use reconciliation::{
    execute_reconciliation, reconcile_environments, reconcile_properties, ContainerMessage,
    ReconcileContext, ReconcileError, ReconcileOptions, ReconciliationResult,
};
pub use template::{render, FormatKind};
