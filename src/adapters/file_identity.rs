//! File-based identity store adapter.
//!
//! The identity is kept as pretty-printed JSON, by default in
//! `~/.chatline/identity.json`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::auth::Identity;
use crate::traits::{IdentityError, IdentityStore};

/// Directory under the home directory holding client state.
const IDENTITY_DIR: &str = ".chatline";

/// The identity file name.
const IDENTITY_FILE: &str = "identity.json";

/// File-based identity store.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store at the default location in the home directory.
    ///
    /// # Returns
    /// The store, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, IdentityError> {
        Self::default_path()
            .map(Self::at)
            .ok_or_else(|| IdentityError::NoLocation("Failed to determine home directory".to_string()))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default identity file path, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(IDENTITY_DIR).join(IDENTITY_FILE))
    }

    /// Get the path to the identity file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IdentityStore for FileIdentityStore {
    async fn load(&self) -> Result<Option<Identity>, IdentityError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(IdentityError::LoadFailed(e.to_string())),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| IdentityError::Serialization(e.to_string()))
    }

    async fn save(&self, identity: &Identity) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| IdentityError::SaveFailed(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(identity)
            .map_err(|e| IdentityError::Serialization(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| IdentityError::SaveFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_path_ends_with_identity_file() {
        if let Some(path) = FileIdentityStore::default_path() {
            assert!(path.ends_with(".chatline/identity.json"));
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileIdentityStore::at(dir.path().join("identity.json"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileIdentityStore::at(dir.path().join("nested").join("identity.json"));

        let identity = Identity::new("user-1").with_token("tok");
        store.save(&identity).await.unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap(), Some(identity));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileIdentityStore::at(path);
        assert!(matches!(
            store.load().await,
            Err(IdentityError::Serialization(_))
        ));
    }
}
