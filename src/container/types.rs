use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key/value pairs rendered into one file. Ordered by key.
pub type Mapping = BTreeMap<String, String>;

/// An explicitly named property file of a container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyFile {
    pub name: String,
    #[serde(default)]
    pub properties: Mapping,
}

/// One managed container as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContainerSpec {
    pub name: String,
    #[serde(default)]
    pub environments: Mapping,
    #[serde(default)]
    pub properties: Mapping,
    #[serde(default)]
    pub property_files: Vec<PropertyFile>,
    /// Fields this crate does not consume (image, ports, ...), echoed back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A property file target after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTarget<'a> {
    pub file_name: String,
    pub properties: &'a Mapping,
}

/// Container record returned to the caller.
///
/// Carries everything of the input except the consumed `environments`,
/// `properties` and `property_files` fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContainerData {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recreate: bool,
}
