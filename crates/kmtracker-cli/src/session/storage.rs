//! File-backed credential store for persisting login state between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::{debug, warn};

use kmtracker_core::{CredentialPair, CredentialStore, Error};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Overrides the credentials file location.
pub const CREDENTIALS_ENV: &str = "KMTRACKER_CREDENTIALS";

/// Stores the credential pair as JSON in a single file.
///
/// Both tokens live in one document, so a save or clear always affects the
/// pair as a whole. A missing or unreadable file reads as "no session".
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at `$KMTRACKER_CREDENTIALS`, or `credentials.json` in the
    /// platform data directory.
    pub fn from_env() -> Result<Self> {
        if let Some(path) = std::env::var_os(CREDENTIALS_ENV) {
            return Ok(Self::new(path));
        }

        let dirs = ProjectDirs::from("", "", "kmtracker")
            .context("Could not determine data directory")?;
        Ok(Self::new(dirs.data_dir().join("credentials.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, pair: &CredentialPair) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(pair)?;
        fs::write(&self.path, json)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<CredentialPair> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read credentials");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed credentials file");
                None
            }
        }
    }

    fn save(&self, pair: &CredentialPair) -> kmtracker_core::Result<()> {
        debug!(path = %self.path.display(), "Saving credentials");
        self.write(pair).map_err(|e| Error::Storage {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }

    fn clear(&self) -> kmtracker_core::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage {
                message: format!("failed to remove {}: {}", self.path.display(), e),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[test]
    fn empty_store_has_no_session() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.load().is_none());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&CredentialPair::new("A1", "R1")).unwrap();
        assert_eq!(store.load(), Some(CredentialPair::new("A1", "R1")));

        store.save(&CredentialPair::new("A2", "R1")).unwrap();
        assert_eq!(store.access_token().unwrap().as_str(), "A2");
    }

    #[test]
    fn clear_removes_both_tokens() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&CredentialPair::new("A1", "R1")).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(!store.path().exists());

        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{\"access\": \"A1\"}").unwrap();

        assert!(FileCredentialStore::new(path).load().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&CredentialPair::new("A1", "R1")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
