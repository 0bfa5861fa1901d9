//! Host stores: the string-to-string key-value facilities the accessor wraps.

mod memory;
mod sled;

pub use self::memory::MemoryStore;
pub use self::sled::{SledStore, SLED_DIR};

use crate::errors::StorageError;
use crate::Result;
use std::convert::TryInto;

/// Interface for a persistent, synchronous, string-keyed, string-valued store.
#[allow(clippy::module_name_repetitions)]
pub trait HostStore: Clone + Send + 'static {
    /// Get the raw text for the given key, if it exists.
    fn get(&self, key: String) -> Result<Option<String>>;
    /// Set the raw text for the given key, overwriting the previous text if it existed.
    fn set(&self, key: String, value: String) -> Result<()>;
    /// Remove the entry for the given key. Will error if the key does not exist.
    fn remove(&self, key: String) -> Result<()>;
}

/// Upper bound on the bytes a store may hold, counted over keys and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    limit: u64,
}

impl Quota {
    /// A quota of `limit` bytes.
    pub fn new(limit: u64) -> Quota {
        Quota { limit }
    }

    #[allow(missing_docs)]
    pub fn limit(self) -> u64 {
        self.limit
    }

    /// Check that replacing an entry of `previous` bytes with one of `incoming`
    /// bytes keeps a store currently holding `used` bytes within the limit.
    pub fn check(self, used: u64, previous: u64, incoming: u64) -> Result<()> {
        let requested = used.saturating_sub(previous) + incoming;
        if requested > self.limit {
            return Err(StorageError::QuotaExceeded {
                limit: self.limit,
                requested,
            }
            .into());
        }
        Ok(())
    }
}

/// Bytes an entry counts against a quota.
pub(crate) fn entry_size(key: &[u8], value: &[u8]) -> Result<u64> {
    Ok((key.len() + value.len()).try_into()?)
}
