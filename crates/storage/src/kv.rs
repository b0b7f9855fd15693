use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known storage keys. New keys go here so call sites never spell raw
/// strings.
pub mod keys {
    /// The signed-in user account.
    pub const USER: &str = "@user";
    /// UI theme preference.
    pub const THEME: &str = "@theme";
    /// Miscellaneous app settings.
    pub const SETTINGS: &str = "@settings";
}

/// Errors surfaced by key/value backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Contract for a string key/value store.
///
/// Raw values are opaque strings; the typed layer on top
/// ([`get_json`]/[`set_json`]) fixes them to JSON.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value for a key, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a raw value, replacing any previous value for the key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    async fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StoreError>;

    /// List every stored key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Fetch and JSON-decode the value for a key.
///
/// # Errors
///
/// Returns `StoreError::Serialization` when the stored value does not parse
/// as `T`, or the backend's error.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get_raw(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| StoreError::Serialization(err.to_string()))
}

/// JSON-encode and store a value under a key.
///
/// # Errors
///
/// Returns `StoreError::Serialization` when the value cannot be encoded, or
/// the backend's error.
pub async fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw =
        serde_json::to_string(value).map_err(|err| StoreError::Serialization(err.to_string()))?;
    store.set_raw(key, &raw).await
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|err| StoreError::Backend(err.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Theme {
        dark: bool,
    }

    #[tokio::test]
    async fn round_trips_raw_values() {
        let store = MemoryStore::new();
        store.set_raw(keys::THEME, "dark").await.unwrap();
        assert_eq!(
            store.get_raw(keys::THEME).await.unwrap().as_deref(),
            Some("dark")
        );

        store.remove(keys::THEME).await.unwrap();
        assert_eq!(store.get_raw(keys::THEME).await.unwrap(), None);
    }

    #[tokio::test]
    async fn typed_helpers_use_json() {
        let store = MemoryStore::new();
        set_json(&store, keys::SETTINGS, &Theme { dark: true })
            .await
            .unwrap();

        let theme: Option<Theme> = get_json(&store, keys::SETTINGS).await.unwrap();
        assert_eq!(theme, Some(Theme { dark: true }));

        let missing: Option<Theme> = get_json(&store, "@missing").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn corrupt_value_is_a_serialization_error() {
        let store = MemoryStore::new();
        store.set_raw(keys::SETTINGS, "not json").await.unwrap();

        let err = get_json::<Theme>(&store, keys::SETTINGS).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn clear_and_keys() {
        let store = MemoryStore::new();
        store.set_raw(keys::USER, "{}").await.unwrap();
        store.set_raw(keys::THEME, "light").await.unwrap();

        assert_eq!(
            store.keys().await.unwrap(),
            vec![keys::THEME.to_owned(), keys::USER.to_owned()]
        );

        store.clear().await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }
}
