//! Typed helpers over the JSON record store.

use fabula_error::{StorageError, StorageErrorKind};
use fabula_interface::RecordStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and deserialize the record at `key`, if present.
pub(crate) async fn read<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(value) => {
            let typed = serde_json::from_value(value).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(format!("{key}: {e}")))
            })?;
            Ok(Some(typed))
        }
        None => Ok(None),
    }
}

/// Serialize and write `value` at `key`.
pub(crate) async fn write<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_value(value).map_err(|e| {
        StorageError::new(StorageErrorKind::Serialization(format!("{key}: {e}")))
    })?;
    store.set(key, json).await
}
