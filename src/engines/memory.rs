use super::{entry_size, HostStore, Quota};
use crate::errors::StorageError;
use crate::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-process host store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MemoryStore {
    entries: Arc<Mutex<Entries>>,
    quota: Option<Quota>,
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, String>,
    /// Bytes currently held, keys included
    used: u64,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Create an empty store which refuses writes beyond `quota`.
    pub fn with_quota(quota: Quota) -> MemoryStore {
        MemoryStore {
            entries: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Bytes currently held by the store.
    pub fn used(&self) -> u64 {
        self.entries.lock().unwrap().used
    }
}

impl HostStore for MemoryStore {
    fn get(&self, key: String) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();

        Ok(entries.map.get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();

        let previous = match entries.map.get(&key) {
            Some(prev) => entry_size(key.as_bytes(), prev.as_bytes())?,
            None => 0,
        };
        let incoming = entry_size(key.as_bytes(), value.as_bytes())?;

        if let Some(quota) = self.quota {
            quota.check(entries.used, previous, incoming)?;
        }

        entries.used = entries.used - previous + incoming;
        entries.map.insert(key, value);

        Ok(())
    }

    fn remove(&self, key: String) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();

        match entries.map.remove(&key) {
            None => Err(StorageError::KeyNotFound.into()),
            Some(value) => {
                entries.used -= entry_size(key.as_bytes(), value.as_bytes())?;
                Ok(())
            }
        }
    }
}
