//! Filesystem-based object store.

use async_trait::async_trait;
use fabula_error::{StorageError, StorageErrorKind};
use fabula_interface::ObjectStore;
use std::path::{Component, Path, PathBuf};

/// Key-addressed object store on the local filesystem.
///
/// Objects land at `{base_path}/{key}` and are reported at
/// `{base_url}/{key}`; a static file server in front of `base_path` makes
/// the URLs publicly reachable. Writes go to a temp file first and are
/// renamed into place for atomicity.
///
/// Callers mint unique, timestamp-suffixed keys, so a put never overwrites
/// a live object.
pub struct FileSystemObjectStore {
    base_path: PathBuf,
    base_url: String,
}

impl FileSystemObjectStore {
    /// Create a new filesystem object store.
    ///
    /// Creates the base directory if it doesn't exist.
    #[tracing::instrument(skip(base_path, base_url))]
    pub fn new(
        base_path: impl Into<PathBuf>,
        base_url: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem object store");
        Ok(Self {
            base_path,
            base_url,
        })
    }

    /// Reject keys that would escape the base directory.
    fn checked_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                "empty key".to_string(),
            )));
        }
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                key.to_string(),
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl ObjectStore for FileSystemObjectStore {
    #[tracing::instrument(skip_all, fields(key = %key, size = bytes.len(), content_type = %content_type))]
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.checked_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::ObjectWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::ObjectWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            key = %key,
            path = %path.display(),
            size = bytes.len(),
            "Stored object"
        );

        Ok(format!("{}/{}", self.base_url, key))
    }
}
