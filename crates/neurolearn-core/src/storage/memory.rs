//! In-process key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KvStore;
use crate::error::StorageError;

/// HashMap-backed store. Nothing survives the process; used for tests
/// and throwaway engines.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_remove() {
        let store = MemoryStore::new();
        assert!(store.get("xp").await.unwrap().is_none());

        store.set("xp", "10").await.unwrap();
        assert_eq!(store.get("xp").await.unwrap().as_deref(), Some("10"));

        store.remove("xp").await.unwrap();
        assert!(store.get("xp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = MemoryStore::new();
        store.set("xp", "10").await.unwrap();
        store.set("streak", "2").await.unwrap();
        assert_eq!(store.len().await, 2);

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
