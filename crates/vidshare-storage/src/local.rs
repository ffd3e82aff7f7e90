//! Local filesystem backend

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use vidshare_core::error::DomainError;
use vidshare_core::traits::{MediaStorage, RepoResult, StoredObject};
use vidshare_core::value_objects::MediaRef;

use crate::keys::is_safe_key;

/// Stores objects as files below `base_path`, served under `base_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Filesystem path for `key`, or `None` when the key would escape `base_path`
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        is_safe_key(key).then(|| self.base_path.join(key))
    }

    fn checked_path(&self, key: &str) -> RepoResult<PathBuf> {
        self.path_for(key)
            .ok_or_else(|| DomainError::StorageError(format!("invalid object key: {key}")))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> RepoResult<StoredObject> {
        let path = self.checked_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::StorageError(format!("failed to create directory: {e}"))
            })?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| DomainError::StorageError(format!("failed to write file: {e}")))?;

        debug!(key, size = data.len(), "Stored media object");

        Ok(StoredObject {
            media: MediaRef::new(key, self.public_url(key)),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> RepoResult<()> {
        let path = self.checked_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Released media object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(key, "Media object already gone");
                Ok(())
            }
            Err(e) => Err(DomainError::StorageError(format!(
                "failed to delete file: {e}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> RepoResult<bool> {
        let path = self.checked_path(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}
