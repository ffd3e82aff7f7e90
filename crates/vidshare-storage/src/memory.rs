//! In-memory backend for tests and `STORAGE_BACKEND=memory`

use async_trait::async_trait;
use dashmap::DashMap;

use vidshare_core::traits::{MediaStorage, RepoResult, StoredObject};
use vidshare_core::value_objects::MediaRef;

#[derive(Debug, Default)]
pub struct InMemoryMediaStorage {
    objects: DashMap<String, (Vec<u8>, String)>,
    base_url: String,
}

impl InMemoryMediaStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: DashMap::new(),
            base_url: base_url.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Stored bytes and content type for `key`
    pub fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStorage {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> RepoResult<StoredObject> {
        self.objects
            .insert(key.to_string(), (data.to_vec(), content_type.to_string()));
        Ok(StoredObject {
            media: MediaRef::new(key, self.public_url(key)),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> RepoResult<()> {
        self.objects.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> RepoResult<bool> {
        Ok(self.objects.contains_key(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}
