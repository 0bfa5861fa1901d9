use crate::codec;
use crate::engines::HostStore;
use crate::errors::{DecodeError, EncodeError};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use slog::Logger;

/// Typed JSON access to a host store.
///
/// Values are written as JSON text and parsed again on the way out.
/// Serialisation failures are not treated as errors by the plain accessors:
///
/// - a value that cannot be encoded is not written at all, so whatever the key
///   held before is left in place;
/// - text that cannot be decoded reads as absent, the same as a missing key.
///
/// Failures of the host store itself (quota, I/O) always propagate.
/// Use [`try_set_item`](TypedStorage::try_set_item) and
/// [`lookup`](TypedStorage::lookup) to tell the cases apart.
///
/// # Examples
///
/// ```
/// use jkvs::{MemoryStore, TypedStorage};
/// use serde_json::{json, Value};
///
/// let log = slog::Logger::root(slog::Discard, slog::o!());
/// let storage = TypedStorage::new(MemoryStore::new(), log);
///
/// storage.set_item("todos", &json!([{"id": 1, "text": "buy milk", "done": false}]))?;
///
/// let todos: Option<Value> = storage.get_item("todos")?;
/// assert_eq!(todos, Some(json!([{"id": 1, "text": "buy milk", "done": false}])));
/// # Ok::<(), failure::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TypedStorage<S: HostStore> {
    store: S,
    log: Logger,
}

/// Outcome of reading a key, keeping "never set" and "corrupt" apart.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The key held valid JSON of the requested shape.
    Value(T),
    /// The store has no entry for the key.
    Missing,
    /// The key held text which did not decode.
    Corrupt(DecodeError),
}

impl<T> Lookup<T> {
    /// Collapse to a plain optional, treating corrupt entries as absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Value(value) => Some(value),
            Lookup::Missing | Lookup::Corrupt(_) => None,
        }
    }
}

impl<S: HostStore> TypedStorage<S> {
    /// Wrap `store`, logging to `log`.
    pub fn new(store: S, log: Logger) -> TypedStorage<S> {
        TypedStorage { store, log }
    }

    /// The underlying host store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// If `value` cannot be encoded nothing is written and `Ok(())` is returned.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        match self.try_set_item(key, value) {
            Err(ref e) if e.downcast_ref::<EncodeError>().is_some() => {
                warn!(self.log, "Dropping unencodable value"; "key" => key, "error" => %e);
                Ok(())
            }
            result => result,
        }
    }

    /// Store `value` under `key`, returning an [`EncodeError`] if it cannot be encoded.
    pub fn try_set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = codec::encode(value)?;

        debug!(self.log, "Set"; "key" => key, "bytes" => text.len());
        self.store.set(key.to_owned(), text)
    }

    /// Read the value under `key`.
    ///
    /// Returns `None` both when the key was never set and when its text does not decode.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.lookup(key)?.into_option())
    }

    /// Read the value under `key`, reporting corrupt entries separately.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Lookup<T>> {
        let text = match self.store.get(key.to_owned())? {
            None => {
                debug!(self.log, "Get"; "key" => key, "found" => false);
                return Ok(Lookup::Missing);
            }
            Some(text) => text,
        };

        debug!(self.log, "Get"; "key" => key, "found" => true, "bytes" => text.len());
        match codec::decode(&text) {
            Ok(value) => Ok(Lookup::Value(value)),
            Err(e) => {
                warn!(self.log, "Stored value does not decode"; "key" => key, "error" => %e);
                Ok(Lookup::Corrupt(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde_json::{json, Value};

    fn storage() -> TypedStorage<MemoryStore> {
        TypedStorage::new(MemoryStore::new(), Logger::root(slog::Discard, o!()))
    }

    #[test]
    fn lookup_distinguishes_missing_from_corrupt() {
        let storage = storage();
        storage
            .store()
            .set("bad".to_owned(), "{not valid".to_owned())
            .unwrap();

        match storage.lookup::<Value>("never").unwrap() {
            Lookup::Missing => {}
            other => panic!("expected missing, got {:?}", other),
        }
        match storage.lookup::<Value>("bad").unwrap() {
            Lookup::Corrupt(_) => {}
            other => panic!("expected corrupt, got {:?}", other),
        }
    }

    #[test]
    fn stored_null_is_a_value() {
        let storage = storage();
        storage.set_item("k", &Value::Null).unwrap();

        assert_eq!(storage.store().get("k".to_owned()).unwrap(), Some("null".to_owned()));
        match storage.lookup::<Value>("k").unwrap() {
            Lookup::Value(Value::Null) => {}
            other => panic!("expected null value, got {:?}", other),
        }
    }

    #[test]
    fn shape_mismatch_reads_as_absent() {
        let storage = storage();
        storage.set_item("n", &json!("text")).unwrap();

        assert_eq!(storage.get_item::<u32>("n").unwrap(), None);
        assert_eq!(storage.get_item::<String>("n").unwrap(), Some("text".to_owned()));
    }
}
