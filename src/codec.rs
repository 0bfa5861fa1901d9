//! JSON text helpers used by the accessor.
//!
//! Neither function panics: every serde failure comes back as a typed error
//! and it is up to the caller whether to suppress it.

use crate::errors::{DecodeError, EncodeError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialise `value` to compact JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    serde_json::to_string(value).map_err(EncodeError)
}

/// Parse JSON text into a `T`.
///
/// An empty string is not JSON, so it fails like any other malformed input.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    serde_json::from_str(text).map_err(DecodeError)
}
