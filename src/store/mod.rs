//! Persisted key-value storage for session data.
//!
//! The app supplies a [`KeyValueStore`]; [`MemoryStore`] and (with the
//! `file-store` feature) [`JsonFileStore`] cover tests and simple hosts.

#[cfg(feature = "file-store")]
mod file;
mod memory;
mod traits;

#[cfg(feature = "file-store")]
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, StoreError};
