use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// Compute SHA-256 hash of a string
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Read the first line of a checksum file.
///
/// Returns an empty string when the file is empty, so a truncated sidecar
/// never matches a real digest. Invalid UTF-8 is read lossily for the same
/// reason.
pub async fn read_checksum_file(path: &Path) -> Result<String, std::io::Error> {
    let content = fs::read(path).await?;
    let content = String::from_utf8_lossy(&content);
    Ok(content.lines().next().unwrap_or_default().to_string())
}
