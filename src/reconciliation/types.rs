use crate::container::ContainerData;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Suffix of every per-container summary
pub const WRITTEN_SUFFIX: &str = "successful written";

/// Summary of the files written for one container.
///
/// Serialized as `{"<name>": {"state": "<files> successful written"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMessage {
    pub name: String,
    pub files: Vec<String>,
}

impl ContainerMessage {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// Human readable summary, e.g. "container.env, web.properties successful written"
    pub fn state(&self) -> String {
        format!("{} {}", self.files.join(", "), WRITTEN_SUFFIX)
    }
}

impl Serialize for ContainerMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct State {
            state: String,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &State { state: self.state() })?;
        map.end()
    }
}

/// Result of one reconciliation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconciliationResult {
    /// True if at least one file was (or, in check mode, would be) written
    pub changed: bool,
    pub failed: bool,
    pub check_mode: bool,
    pub container_data: Vec<ContainerData>,
    pub msg: Vec<ContainerMessage>,
}
