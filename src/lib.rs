//! The `jkvs` crate stores typed values as JSON text in a string key-value store.
//!
//! [`TypedStorage`] wraps any [`HostStore`], encoding values on the way in and
//! decoding them on the way out. Values which fail to encode are dropped and
//! text which fails to decode reads as absent, unless the caller asks otherwise.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::module_name_repetitions, missing_docs)]

#[macro_use]
extern crate slog;

mod accessor;
pub mod codec;
mod engines;
mod errors;

pub use self::accessor::{Lookup, TypedStorage};
pub use self::engines::{HostStore, MemoryStore, Quota, SledStore, SLED_DIR};
pub use self::errors::{DecodeError, EncodeError, Result, StorageError};
