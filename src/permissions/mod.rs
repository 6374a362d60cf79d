//! Ownership and mode of the files written by a run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

static MODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:0o)?([0-7]{3,4})$").expect("valid mode pattern"));

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid file mode '{0}', expected an octal string such as \"0644\"")]
    InvalidMode(String),

    #[error("User '{0}' not found")]
    UnknownUser(String),

    #[error("Group '{0}' not found")]
    UnknownGroup(String),

    #[error("Failed to look up '{name}': {reason}")]
    LookupFailed { name: String, reason: String },
}

/// Requested ownership and mode, as given by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    #[serde(
        default,
        deserialize_with = "name_or_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,
    #[serde(
        default,
        deserialize_with = "name_or_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// A user or group given either by name or by numeric id
#[derive(Deserialize)]
#[serde(untagged)]
enum NameOrId {
    Name(String),
    Id(u32),
}

/// Accept `"app"`, `"1000"` and `1000` alike; ids are kept as their decimal text
fn name_or_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NameOrId>::deserialize(deserializer)?.map(|value| match value {
        NameOrId::Name(name) => name,
        NameOrId::Id(id) => id.to_string(),
    }))
}

/// Attributes with user and group names resolved to numeric ids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedAttributes {
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub mode: Option<u32>,
}

/// Parse an octal mode string ("0644", "644" or "0o644")
pub fn parse_mode(mode: &str) -> Result<u32, PermissionError> {
    let digits = MODE_PATTERN
        .captures(mode.trim())
        .and_then(|c| c.get(1))
        .ok_or_else(|| PermissionError::InvalidMode(mode.to_string()))?;

    u32::from_str_radix(digits.as_str(), 8)
        .map_err(|_| PermissionError::InvalidMode(mode.to_string()))
}

impl FileAttributes {
    /// Validate the mode and resolve owner and group to ids.
    ///
    /// Numeric owners and groups are taken as ids without a lookup.
    pub fn resolve(&self) -> Result<ResolvedAttributes, PermissionError> {
        let mode = self.mode.as_deref().map(parse_mode).transpose()?;
        let (uid, gid) = resolve_ids(self.owner.as_deref(), self.group.as_deref())?;
        Ok(ResolvedAttributes { uid, gid, mode })
    }
}

#[cfg(unix)]
fn resolve_ids(
    owner: Option<&str>,
    group: Option<&str>,
) -> Result<(Option<u32>, Option<u32>), PermissionError> {
    let uid = owner.map(resolve_user).transpose()?;
    let gid = group.map(resolve_group).transpose()?;
    Ok((uid, gid))
}

#[cfg(not(unix))]
fn resolve_ids(
    owner: Option<&str>,
    group: Option<&str>,
) -> Result<(Option<u32>, Option<u32>), PermissionError> {
    if owner.is_some() || group.is_some() {
        tracing::warn!("File ownership is not supported on this platform, ignoring");
    }
    Ok((None, None))
}

#[cfg(unix)]
fn resolve_user(name: &str) -> Result<u32, PermissionError> {
    if let Ok(uid) = name.parse::<u32>() {
        return Ok(uid);
    }

    nix::unistd::User::from_name(name)
        .map_err(|e| PermissionError::LookupFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?
        .map(|user| user.uid.as_raw())
        .ok_or_else(|| PermissionError::UnknownUser(name.to_string()))
}

#[cfg(unix)]
fn resolve_group(name: &str) -> Result<u32, PermissionError> {
    if let Ok(gid) = name.parse::<u32>() {
        return Ok(gid);
    }

    nix::unistd::Group::from_name(name)
        .map_err(|e| PermissionError::LookupFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?
        .map(|group| group.gid.as_raw())
        .ok_or_else(|| PermissionError::UnknownGroup(name.to_string()))
}

impl ResolvedAttributes {
    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.gid.is_none() && self.mode.is_none()
    }

    /// Apply ownership and mode to a written file
    pub async fn apply_to_file(&self, path: &Path) -> Result<(), PermissionError> {
        self.apply_owner(path)?;
        if let Some(mode) = self.mode {
            set_mode(path, mode).await?;
        }
        Ok(())
    }

    /// Apply ownership only; a file mode is not meaningful for directories
    pub async fn apply_to_directory(&self, path: &Path) -> Result<(), PermissionError> {
        self.apply_owner(path)
    }

    #[cfg(unix)]
    fn apply_owner(&self, path: &Path) -> Result<(), PermissionError> {
        if self.uid.is_some() || self.gid.is_some() {
            std::os::unix::fs::chown(path, self.uid, self.gid)?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_owner(&self, _path: &Path) -> Result<(), PermissionError> {
        Ok(())
    }
}

/// Set file permissions
#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<(), PermissionError> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(mode);
    tokio::fs::set_permissions(path, permissions).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn set_mode(_path: &Path, _mode: u32) -> Result<(), PermissionError> {
    Ok(())
}
