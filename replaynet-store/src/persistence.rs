//! JSON persistence and default locations.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/replaynet`
/// - Linux: `~/.config/replaynet`
/// - Windows: `%APPDATA%\replaynet`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("replaynet")
}

/// Returns the default pipeline configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Returns the default key-value store file path.
pub fn default_store_path() -> PathBuf {
    default_config_dir().join("store.json")
}

// ============================================================================
// File Operations
// ============================================================================

/// Applies an owner-only `mode` to `path`. No-op off Unix.
#[cfg(unix)]
async fn restrict(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    debug!(path = %path.display(), mode = %format_args!("{mode:o}"), "Restricted permissions");
    Ok(())
}

#[cfg(not(unix))]
async fn restrict(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

/// Writes `data` as pretty JSON to `path`.
///
/// The parent directory is created owner-only (0700) when missing. The file
/// is replaced through a sibling `.json.tmp` and left at 0600, since the
/// store may hold credentials.
///
/// # Errors
///
/// Returns error if serialization or any filesystem step fails.
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            restrict(parent, 0o700).await?;
        }
    }

    let json = serde_json::to_string_pretty(data)?;
    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    tokio::fs::rename(&temp_path, path).await?;
    restrict(path, 0o600).await?;

    debug!(path = %path.display(), bytes = json.len(), "Saved JSON");
    Ok(())
}

/// Reads and parses a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be read or does not parse as `T`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Like [`load_json`], falling back to `T::default()`.
///
/// A missing file is silent; a file that fails to parse is logged.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(StoreError::Io(_)) => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable JSON");
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir() {
        let path = default_config_dir();
        assert!(path.ends_with("replaynet"));
    }

    #[test]
    fn test_default_paths() {
        assert!(default_config_path().ends_with("config.json"));
        assert!(default_store_path().ends_with("store.json"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        save_json(&test_file, &serde_json::json!({})).await.unwrap();

        let metadata = tokio::fs::metadata(&test_file).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "File should have 0600 permissions");
    }
}
