//! Generic load/save of named values over a durable key-value substrate.
//!
//! Values are stored as JSON text. Presence is decided by the substrate
//! (`Some` vs `None`), never by the truthiness of the decoded value: a stored
//! `null` that cannot decode into the requested type is a malformed record and
//! falls back to the default like any other decode failure.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Boxed error type returned by substrate implementations.
pub type StorageError = Box<dyn std::error::Error + Send + Sync>;

/// A durable string key-value substrate.
///
/// `set` overwrites any prior value for `key`. Implementations are used from a
/// single thread and take `&self`, matching how a SQLite connection is driven.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[derive(Debug)]
pub enum PersistError {
    Storage(StorageError),
    Serialize(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Storage(e) => write!(f, "storage error: {e}"),
            PersistError::Serialize(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Serialize(e)
    }
}

/// Load and decode the value stored under `key`.
///
/// Returns `default` when nothing is stored, the read fails, or the stored
/// text does not decode into `T`. Failures are logged, never returned.
pub fn load<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no stored record for '{key}', using default");
            return default;
        }
        Err(e) => {
            tracing::warn!("failed to read record '{key}': {e}");
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("malformed record '{key}', using default: {e}");
            default
        }
    }
}

/// Encode `value` and write it under `key`, replacing any prior value.
pub fn save<T, S>(store: &S, key: &str, value: &T) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json).map_err(PersistError::Storage)
}

/// In-memory substrate. Clones share the same entries, so a test can hand one
/// clone to a registry and inspect or reuse the other.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record, bypassing serialization.
    pub fn with_raw(key: &str, raw: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err("substrate unavailable".into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err("quota exceeded".into())
        }
    }

    #[test]
    fn test_load_missing_returns_default() {
        let store = MemoryStore::new();
        let value: BTreeMap<String, bool> = load(&store, "tech", BTreeMap::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut map = BTreeMap::new();
        map.insert("construction".to_string(), true);
        save(&store, "tech", &map).unwrap();

        assert_eq!(store.raw("tech").as_deref(), Some(r#"{"construction":true}"#));
        let loaded: BTreeMap<String, bool> = load(&store, "tech", BTreeMap::new());
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        save(&store, "k", &1u32).unwrap();
        save(&store, "k", &2u32).unwrap();
        assert_eq!(load(&store, "k", 0u32), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stored_null_is_malformed_not_absent() {
        let store = MemoryStore::with_raw("tech", "null");
        let mut default = BTreeMap::new();
        default.insert("sentinel".to_string(), true);

        let loaded: BTreeMap<String, bool> = load(&store, "tech", default.clone());
        assert_eq!(loaded, default);
    }

    #[test]
    fn test_stored_empty_object_is_present() {
        let store = MemoryStore::with_raw("tech", "{}");
        let mut default = BTreeMap::new();
        default.insert("sentinel".to_string(), true);

        let loaded: BTreeMap<String, bool> = load(&store, "tech", default);
        assert!(loaded.is_empty(), "stored {{}} must win over the default");
    }

    #[test]
    fn test_garbage_falls_back() {
        let store = MemoryStore::with_raw("tech", "not json at all");
        let loaded: BTreeMap<String, bool> = load(&store, "tech", BTreeMap::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_read_failure_is_absorbed() {
        assert_eq!(load(&BrokenStore, "k", 7u32), 7);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let err = save(&BrokenStore, "k", &1u32).unwrap_err();
        assert!(matches!(err, PersistError::Storage(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("x", "1").unwrap();
        assert_eq!(b.get("x").unwrap().as_deref(), Some("1"));
    }
}
