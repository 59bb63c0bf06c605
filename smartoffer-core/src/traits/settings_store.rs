//! Key/value persistence port for client-side settings.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Settings persistence abstraction.
///
/// Replaces the browser localStorage dependency of the original client: a
/// web shell backs this with localStorage, a desktop shell with a config
/// file, and tests with [`InMemorySettingsStore`]. The interface is async
/// because none of those backends is guaranteed to be synchronously
/// available.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read one value.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - the key exists
    /// * `Ok(None)` - the key was never written or has been removed
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write one value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove one value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> CoreResult<()>;
}

/// Built-in volatile store for tests and server-rendered environments.
#[derive(Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // removing again is fine
        store.remove("k").await.unwrap();
    }
}
