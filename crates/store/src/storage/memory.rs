use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::KeyValueStorage;
use crate::error::StorageError;

/// In-memory key/value storage for tests and ephemeral sessions.
///
/// Wrap it in an `Arc` to share one backing map between successive stores
/// (e.g. to simulate an application restart).
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    ///
    /// Counts through a poisoned lock; `get`/`set`/`remove` report the
    /// poisoning as [`StorageError::Unavailable`] instead.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::unavailable("in-memory storage lock poisoned")
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));

        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn set_many_writes_every_entry() {
        let storage = InMemoryStorage::new();
        storage
            .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn poisoned_lock_fails_access_but_still_counts() {
        let storage = std::sync::Arc::new(InMemoryStorage::new());
        storage.set("k", "v").unwrap();

        let writer = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("writer died");
        })
        .join();

        assert!(matches!(storage.get("k"), Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.set("k", "w"), Err(StorageError::Unavailable(_))));
        assert_eq!(storage.len(), 1);
    }
}
