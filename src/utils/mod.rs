mod hash;

pub use hash::{compute_hash, read_checksum_file};

use std::path::{Path, PathBuf};

/// The name of the environment file written for every container
pub const ENV_FILE: &str = "container.env";

/// Suffix appended to a data file to get its checksum sidecar
pub const CHECKSUM_SUFFIX: &str = ".checksum";

/// Extension of the implicit per-container properties file
pub const PROPERTIES_EXTENSION: &str = "properties";

/// Get the directory holding a container's files
pub fn get_container_path(base_directory: &Path, container_name: &str) -> PathBuf {
    base_directory.join(container_name)
}

/// Get the checksum sidecar path for a data file (`<data_file>.checksum`)
pub fn get_checksum_path(data_file: &Path) -> PathBuf {
    let mut path = data_file.as_os_str().to_owned();
    path.push(CHECKSUM_SUFFIX);
    PathBuf::from(path)
}

/// Name of the implicit properties file of a container (`<name>.properties`)
pub fn default_properties_file(container_name: &str) -> String {
    format!("{}.{}", container_name, PROPERTIES_EXTENSION)
}
