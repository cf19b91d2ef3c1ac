//! Blob storage contract and the local filesystem backend.
//!
//! Attachment columns (`avatar`, `thumb`, `file`, `cover`) hold a key that
//! is relative to the store root, e.g. `notes/files/week1.pdf`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Upload prefixes
// ---------------------------------------------------------------------------

pub const AVATAR_PREFIX: &str = "profiles/avatars/";
pub const TUTORIAL_THUMB_PREFIX: &str = "tutorials/thumbnails/";
pub const NOTES_FILE_PREFIX: &str = "notes/files/";
pub const NOTES_COVER_PREFIX: &str = "notes/covers/";

/// Default media root when `MEDIA_ROOT` is unset.
pub const DEFAULT_MEDIA_ROOT: &str = "./media";

/// Build a storage key for an uploaded file under `prefix`.
///
/// Only the final path component of `filename` is kept.
pub fn upload_key(prefix: &str, filename: &str) -> Result<String, CoreError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CoreError::Validation(format!("Invalid upload filename '{filename}'")))?;
    Ok(format!("{prefix}{name}"))
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Store/retrieve/delete-by-key contract for attachment blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing blob.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;

    /// Read the blob stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, CoreError>;

    async fn exists(&self, key: &str) -> Result<bool, CoreError>;

    /// Remove the blob under `key`. Removing a missing blob succeeds.
    async fn delete(&self, key: &str) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// Local filesystem backend
// ---------------------------------------------------------------------------

/// Stores blobs as files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.media_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` below the root, rejecting absolute paths and `..`.
    fn resolve(&self, key: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(key);
        let is_safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(CoreError::Validation(format!("Invalid storage key '{key}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Storage(format!("Failed to create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to write {key}: {e}")))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, CoreError> {
        let path = self.resolve(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to read {key}: {e}")))
    }

    async fn exists(&self, key: &str) -> Result<bool, CoreError> {
        let path = self.resolve(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to stat {key}: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Storage(format!("Failed to delete {key}: {e}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Blob storage configuration loaded from environment variables.
///
/// | Env Var      | Default   |
/// |--------------|-----------|
/// | `MEDIA_ROOT` | `./media` |
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub media_root: PathBuf,
}

impl StorageConfig {
    /// Never fails: an unset or blank `MEDIA_ROOT` means the default.
    pub fn from_env() -> Self {
        Self::from_parts(std::env::var("MEDIA_ROOT").ok().as_deref())
    }

    pub fn from_parts(media_root: Option<&str>) -> Self {
        let media_root = media_root
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MEDIA_ROOT);
        Self {
            media_root: PathBuf::from(media_root),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn upload_key_keeps_file_name_only() {
        assert_eq!(
            upload_key(NOTES_FILE_PREFIX, "../../etc/week1.pdf").unwrap(),
            "notes/files/week1.pdf"
        );
        assert_eq!(
            upload_key(AVATAR_PREFIX, "me.png").unwrap(),
            "profiles/avatars/me.png"
        );
        assert_eq!(
            upload_key(TUTORIAL_THUMB_PREFIX, "C:/tmp/intro.jpg").unwrap(),
            "tutorials/thumbnails/intro.jpg"
        );
        assert!(upload_key(NOTES_COVER_PREFIX, "").is_err());
        assert!(upload_key(NOTES_COVER_PREFIX, "..").is_err());
    }

    #[test]
    fn blank_media_root_uses_default() {
        let default = PathBuf::from(DEFAULT_MEDIA_ROOT);
        assert_eq!(StorageConfig::from_parts(None).media_root, default);
        assert_eq!(StorageConfig::from_parts(Some("  ")).media_root, default);
        assert_eq!(
            StorageConfig::from_parts(Some("/srv/media")).media_root,
            PathBuf::from("/srv/media")
        );
    }

    #[tokio::test]
    async fn put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        store.put("notes/files/a.pdf", b"pdf").await.unwrap();
        assert!(store.exists("notes/files/a.pdf").await.unwrap());
        assert_eq!(store.get("notes/files/a.pdf").await.unwrap(), b"pdf");

        store.delete("notes/files/a.pdf").await.unwrap();
        assert!(!store.exists("notes/files/a.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn deleting_missing_blob_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(store.delete("notes/covers/none.png").await.is_ok());
    }

    #[tokio::test]
    async fn keys_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        assert_matches!(
            store.put("../outside.txt", b"x").await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(store.delete("/etc/passwd").await, Err(CoreError::Validation(_)));
        assert_matches!(store.exists("").await, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn reading_missing_blob_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert_matches!(store.get("missing").await, Err(CoreError::Storage(_)));
    }
}
