//! Persistent intent store.
//!
//! The store owns the single storage slot that carries a [`PendingExport`]
//! across the navigation to the authorization page and back. The slot key
//! and its JSON layout are defined here and nowhere else.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::{Error, Result};
use crate::export::PendingExport;

/// Durable, origin-scoped string storage (the browser's `localStorage`).
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory [`KeyValueStorage`] for native use and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Single-slot store for the pending export.
#[derive(Clone)]
pub struct IntentStore {
    storage: Rc<dyn KeyValueStorage>,
    key: String,
}

impl std::fmt::Debug for IntentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl IntentStore {
    /// Create a store over `storage` using the default slot key.
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Use a different slot key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The slot key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Store `export`, replacing whatever was there.
    pub fn save(&self, export: &PendingExport) -> Result<()> {
        let json = serde_json::to_string(export).map_err(|e| {
            error!("Failed to serialize pending export: {}", e);
            Error::Serialization(e)
        })?;
        self.storage.set(&self.key, &json).map_err(|e| {
            error!(key = %self.key, "Failed to save pending export: {}", e);
            e
        })?;
        debug!(
            playlist = %export.playlist_name,
            tracks = export.track_ids.len(),
            "Saved pending export"
        );
        Ok(())
    }

    /// Read the stored export.
    ///
    /// Missing, unreadable, or malformed values all come back as `None`.
    pub fn load(&self) -> Option<PendingExport> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, "Could not read pending export: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PendingExport>(&raw) {
            Ok(export) if export.is_well_formed() => Some(export),
            Ok(_) => {
                warn!(key = %self.key, "Ignoring incomplete pending export");
                None
            }
            Err(e) => {
                warn!(key = %self.key, "Ignoring corrupt pending export: {}", e);
                None
            }
        }
    }

    /// Remove the stored export. Safe to call when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        debug!(key = %self.key, "Cleared pending export");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("SecurityError".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("QuotaExceededError".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("SecurityError".to_string()))
        }
    }

    fn store() -> (Rc<MemoryStorage>, IntentStore) {
        let storage = Rc::new(MemoryStorage::new());
        let store = IntentStore::new(storage.clone());
        (storage, store)
    }

    fn export(name: &str) -> PendingExport {
        PendingExport {
            playlist_name: name.to_string(),
            track_ids: vec!["t1".to_string(), "t2".to_string()],
            created_at: 1_704_067_200_000,
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_, store) = store();
        let saved = export("Morning Flow - 2024-01-01");
        store.save(&saved).unwrap();
        assert_eq!(store.load(), Some(saved));
    }

    #[test]
    fn test_save_overwrites_previous_export() {
        let (storage, store) = store();
        store.save(&export("first")).unwrap();
        store.save(&export("second")).unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(store.load().unwrap().playlist_name, "second");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_, store) = store();
        store.clear().unwrap();
        store.save(&export("x")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_treats_garbage_as_absent() {
        let (storage, store) = store();
        storage.set(DEFAULT_STORAGE_KEY, "{\"playlistName\": ").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_treats_empty_tracks_as_absent() {
        let (storage, store) = store();
        storage
            .set(DEFAULT_STORAGE_KEY, r#"{"playlistName":"x","trackIds":[]}"#)
            .unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_accepts_legacy_layout() {
        let (storage, store) = store();
        storage
            .set(
                DEFAULT_STORAGE_KEY,
                r#"{"playlistName":"Vinyasa Flow - 2024-03-02","trackIds":["abc"]}"#,
            )
            .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.playlist_name, "Vinyasa Flow - 2024-03-02");
        assert_eq!(loaded.created_at, 0);
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let (storage, store) = store();
        let other = IntentStore::new(storage).with_key("otherSlot");
        store.save(&export("default slot")).unwrap();
        assert_eq!(other.key(), "otherSlot");
        assert_eq!(other.load(), None);
    }

    #[test]
    fn test_failing_storage() {
        let store = IntentStore::new(Rc::new(FailingStorage));
        assert!(matches!(store.save(&export("x")), Err(Error::Storage(_))));
        assert_eq!(store.load(), None);
        assert!(store.clear().is_err());
    }
}
