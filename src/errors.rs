use std::result;

/// Convenience Result type.
pub type Result<T> = result::Result<T, failure::Error>;

/// Errors raised by the host stores.
#[derive(Debug, failure::Fail, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// An attempt was made to open a store in a non-directory file path
    #[fail(display = "Not a directory")]
    NotADirectory,

    /// A key was not found in the store
    #[fail(display = "Key not found")]
    KeyNotFound,

    /// Writing the entry would take the store over its byte limit
    #[fail(
        display = "Quota exceeded: {} bytes requested, limit is {} bytes",
        requested, limit
    )]
    QuotaExceeded {
        /// Configured limit, in bytes
        limit: u64,
        /// Total usage the rejected write would have produced
        requested: u64,
    },
}

/// A value could not be turned into JSON text.
#[derive(Debug, failure::Fail)]
#[fail(display = "Failed to encode value: {}", _0)]
pub struct EncodeError(#[cause] pub serde_json::Error);

/// Stored text could not be turned back into a value.
#[derive(Debug, failure::Fail)]
#[fail(display = "Failed to decode value: {}", _0)]
pub struct DecodeError(#[cause] pub serde_json::Error);
