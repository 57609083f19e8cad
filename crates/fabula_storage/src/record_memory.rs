//! In-memory record store.

use async_trait::async_trait;
use fabula_error::StorageError;
use fabula_interface::RecordStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<String, serde_json::Value>,
    hashes: HashMap<String, HashMap<String, String>>,
}

/// In-process [`RecordStore`] backed by hash maps.
///
/// Used by tests and single-process development. Each operation takes the
/// lock once, matching the single-key atomicity the contract promises; no
/// operation spans keys.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of plain records currently stored (test helper).
    pub async fn len(&self) -> usize {
        self.tables.read().await.records.len()
    }

    /// Whether no plain records are stored (test helper).
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.tables.read().await.records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .records
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        tables.records.remove(key);
        tables.hashes.remove(key);
        Ok(())
    }

    async fn hash_get(&self, key: &str) -> Result<HashMap<String, String>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .hashes
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn hash_set(
        &self,
        key: &str,
        fields: HashMap<String, String>,
    ) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .hashes
            .entry(key.to_string())
            .or_default()
            .extend(fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_del_roundtrip() {
        let store = MemoryRecordStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", json!({"a": 1})).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!({"a": 1})));

        store.del("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        // deleting an absent key is not an error
        store.del("k").await.unwrap();
    }

    #[tokio::test]
    async fn hash_set_merges_fields() {
        let store = MemoryRecordStore::new();
        store
            .hash_set("h", HashMap::from([("a".to_string(), "1".to_string())]))
            .await
            .unwrap();
        store
            .hash_set("h", HashMap::from([("b".to_string(), "2".to_string())]))
            .await
            .unwrap();

        let fields = store.hash_get("h").await.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["a"], "1");
        assert_eq!(fields["b"], "2");
    }
}
