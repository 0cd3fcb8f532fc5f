use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{KeyValueStore, StoreError};

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Storage(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        Ok(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn get_of_missing_key_is_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("user", "a").await.unwrap();
        store.set("user", "b").await.unwrap();

        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("user", "a").await.unwrap();

        store.remove("user").await.unwrap();
        store.remove("user").await.unwrap();

        assert_eq!(store.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn factory_creates_empty_store() {
        let store = MemoryStoreFactory
            .create(&StoreConfig::default())
            .await
            .unwrap();

        assert_eq!(MemoryStoreFactory.backend_name(), "memory");
        assert_eq!(store.get("anything").await.unwrap(), None);
    }
}
