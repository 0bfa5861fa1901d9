use super::{entry_size, HostStore, Quota};
use crate::errors::StorageError;
use crate::Result;
use sled::Db;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Name of the directory the store keeps its data in.
pub const SLED_DIR: &str = ".jkvs";

/// Persistent host store using `sled`.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SledStore {
    db: Arc<Mutex<Db>>,
    quota: Option<Quota>,
}

impl SledStore {
    /// Open (or create) a store inside the given `path` directory.
    /// The data is kept in a directory named `.jkvs` inside `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<SledStore> {
        let path_dir = path.into();
        if !path_dir.is_dir() {
            return Err(StorageError::NotADirectory.into());
        }
        let sled_dir = path_dir.join(SLED_DIR);

        fs::create_dir_all(&sled_dir)?;

        let db = Db::open(sled_dir)?;

        Ok(SledStore {
            db: Arc::new(Mutex::new(db)),
            quota: None,
        })
    }

    /// Refuse writes which would take the store beyond `quota`.
    pub fn with_quota(self, quota: Quota) -> SledStore {
        SledStore {
            quota: Some(quota),
            ..self
        }
    }
}

fn used(db: &Db) -> Result<u64> {
    let mut total = 0;
    for entry in db.iter() {
        let (key, value) = entry?;
        total += entry_size(&key, &value)?;
    }
    Ok(total)
}

impl HostStore for SledStore {
    fn get(&self, key: String) -> Result<Option<String>> {
        let db = self.db.lock().unwrap();

        match db.get(key)? {
            None => Ok(None),
            Some(buf) => Ok(Some(String::from_utf8(buf.to_vec())?)),
        }
    }

    fn set(&self, key: String, value: String) -> Result<()> {
        let db = self.db.lock().unwrap();

        if let Some(quota) = self.quota {
            let previous = match db.get(&key)? {
                Some(prev) => entry_size(key.as_bytes(), &prev)?,
                None => 0,
            };
            let incoming = entry_size(key.as_bytes(), value.as_bytes())?;
            quota.check(used(&db)?, previous, incoming)?;
        }

        db.insert(key, value.into_bytes())?;
        db.flush()?;
        Ok(())
    }

    fn remove(&self, key: String) -> Result<()> {
        let db = self.db.lock().unwrap();

        match db.remove(key)? {
            None => Err(StorageError::KeyNotFound.into()),
            Some(_) => {
                db.flush()?;
                Ok(())
            }
        }
    }
}
