//! Container records and their normalization into render targets.

mod types;

pub use types::{ContainerData, ContainerSpec, Mapping, PropertyFile, PropertyTarget};

use crate::utils::{default_properties_file, CHECKSUM_SUFFIX, ENV_FILE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Allowed container and property file names: one path component, no
/// leading dot. Same character set docker accepts for container names.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid name pattern"));

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Invalid container name '{0}'")]
    InvalidContainerName(String),

    #[error("Invalid property file name '{name}' in container '{container}'")]
    InvalidPropertyFileName { container: String, name: String },

    #[error("Container '{0}' is defined more than once")]
    DuplicateContainer(String),

    #[error("Property file '{name}' is defined more than once in container '{container}'")]
    DuplicatePropertyFile { container: String, name: String },

    #[error("Property file name '{name}' in container '{container}' is reserved")]
    ReservedPropertyFileName { container: String, name: String },

    #[error(
        "Property file '{name}' in container '{container}' is given both explicitly and through 'properties'"
    )]
    ConflictingPropertyFile { container: String, name: String },
}

/// Check if a property file name would collide with the env file or a checksum file
pub fn is_reserved_file_name(name: &str) -> bool {
    name == ENV_FILE || name.ends_with(CHECKSUM_SUFFIX)
}

/// Check if a string can be used as a container or property file name
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

impl ContainerSpec {
    /// Validate the names of this container and its property files
    pub fn validate(&self) -> Result<(), ContainerError> {
        if !is_valid_name(&self.name) {
            return Err(ContainerError::InvalidContainerName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for file in &self.property_files {
            if !is_valid_name(&file.name) {
                return Err(ContainerError::InvalidPropertyFileName {
                    container: self.name.clone(),
                    name: file.name.clone(),
                });
            }
            if is_reserved_file_name(&file.name) {
                return Err(ContainerError::ReservedPropertyFileName {
                    container: self.name.clone(),
                    name: file.name.clone(),
                });
            }
            if !seen.insert(file.name.as_str()) {
                return Err(ContainerError::DuplicatePropertyFile {
                    container: self.name.clone(),
                    name: file.name.clone(),
                });
            }
        }

        let implicit = default_properties_file(&self.name);
        if !self.properties.is_empty() && seen.contains(implicit.as_str()) {
            return Err(ContainerError::ConflictingPropertyFile {
                container: self.name.clone(),
                name: implicit,
            });
        }

        Ok(())
    }

    /// All property file targets of this container, in processing order.
    ///
    /// Explicit `property_files` come first, followed by the implicit
    /// `<name>.properties` holding the direct `properties` mapping. The
    /// implicit target is left out when an explicit file already owns that
    /// name; [`ContainerSpec::validate`] makes sure `properties` is empty
    /// in that case.
    pub fn property_targets(&self) -> Vec<PropertyTarget<'_>> {
        let mut targets: Vec<PropertyTarget<'_>> = self
            .property_files
            .iter()
            .map(|file| PropertyTarget {
                file_name: file.name.clone(),
                properties: &file.properties,
            })
            .collect();

        let implicit = default_properties_file(&self.name);
        if !targets.iter().any(|t| t.file_name == implicit) {
            targets.push(PropertyTarget {
                file_name: implicit,
                properties: &self.properties,
            });
        }

        targets
    }

    /// Build the output record, dropping the consumed payload fields.
    ///
    /// A `recreate` field given by the caller is passed through unless this
    /// run changed the container, in which case it becomes `true`.
    pub fn to_container_data(&self, recreate: bool) -> ContainerData {
        let mut extra = self.extra.clone();
        if recreate {
            extra.remove("recreate");
        }

        ContainerData {
            name: self.name.clone(),
            extra,
            recreate,
        }
    }
}

/// Validate a whole container list: names, and uniqueness of container names
pub fn validate_containers(containers: &[ContainerSpec]) -> Result<(), ContainerError> {
    let mut seen = HashSet::new();
    for container in containers {
        container.validate()?;
        if !seen.insert(container.name.as_str()) {
            return Err(ContainerError::DuplicateContainer(container.name.clone()));
        }
    }
    Ok(())
}
