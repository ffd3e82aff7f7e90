//! Media storage port

use async_trait::async_trait;

use crate::value_objects::MediaRef;

use super::RepoResult;

/// Object written by a [`MediaStorage`] backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub media: MediaRef,
    pub size: u64,
    pub content_type: String,
}

/// Blob store for uploaded video files and thumbnails
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `data` under `key`, replacing any object already there
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> RepoResult<StoredObject>;

    /// Release the object at `key`. Releasing a missing key succeeds.
    async fn delete(&self, key: &str) -> RepoResult<()>;

    async fn exists(&self, key: &str) -> RepoResult<bool>;

    /// URL clients use to fetch the object at `key`
    fn public_url(&self, key: &str) -> String;
}
