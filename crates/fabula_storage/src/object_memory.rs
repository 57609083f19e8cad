//! In-memory object store.

use async_trait::async_trait;
use fabula_error::StorageError;
use fabula_interface::ObjectStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process [`ObjectStore`] for tests.
///
/// Keeps every stored payload so assertions can inspect what was written.
#[derive(Debug)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryObjectStore {
    /// Create an empty store serving URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// The payload and content type stored at `key`, if any.
    pub async fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.read().await.get(key).cloned()
    }

    /// All stored keys.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://objects")
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.write().await.insert(
            key.to_string(),
            (bytes.to_vec(), content_type.to_string()),
        );
        Ok(format!("{}/{}", self.base_url, key))
    }
}
