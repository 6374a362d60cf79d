use crate::container::ContainerSpec;
use crate::permissions::FileAttributes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Path argument that reads the request from stdin
pub const STDIN_PATH: &str = "-";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No base directory given")]
    MissingBaseDirectory,
}

/// One invocation: where to write and what to write
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,
    #[serde(default, alias = "containers")]
    pub container: Vec<ContainerSpec>,
    #[serde(flatten)]
    pub attributes: FileAttributes,
    #[serde(default)]
    pub check_mode: bool,
}

/// Values given on the command line, taking precedence over the request file
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub base_directory: Option<PathBuf>,
    pub owner: Option<String>,
    pub group: Option<String>,
    pub mode: Option<String>,
    pub check_mode: bool,
}

impl ReconcileRequest {
    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: RequestOverrides) -> Self {
        if overrides.base_directory.is_some() {
            self.base_directory = overrides.base_directory;
        }
        if overrides.owner.is_some() {
            self.attributes.owner = overrides.owner;
        }
        if overrides.group.is_some() {
            self.attributes.group = overrides.group;
        }
        if overrides.mode.is_some() {
            self.attributes.mode = overrides.mode;
        }
        self.check_mode |= overrides.check_mode;
        self
    }

    pub fn base_directory(&self) -> Result<&Path, ConfigError> {
        self.base_directory
            .as_deref()
            .ok_or(ConfigError::MissingBaseDirectory)
    }
}

/// Parse a request document
pub fn parse_request(content: &str) -> Result<ReconcileRequest, ConfigError> {
    let request: ReconcileRequest = serde_json::from_str(content)?;
    Ok(request)
}

/// Read a request document from a file, or from stdin when the path is `-`
pub async fn read_request(path: &Path) -> Result<ReconcileRequest, ConfigError> {
    let content = if path == Path::new(STDIN_PATH) {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        content
    } else {
        fs::read_to_string(path).await?
    };

    parse_request(&content)
}
