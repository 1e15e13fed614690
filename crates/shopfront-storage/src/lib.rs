//! Durable key-value slots for the Shopfront cart.
//!
//! A [`Storage`] holds one string value per key, with JSON helpers for
//! typed values. Two backends are provided:
//!
//! - [`MemoryStorage`] keeps slots in process memory (tests, embedding)
//! - [`FileStorage`] keeps one `<key>.json` file per slot in a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storage::{FileStorage, Storage};
//!
//! let storage = FileStorage::open(".shopfront")?;
//!
//! // Store a value
//! storage.set("cart", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<serde_json::Value>> = storage.get("cart")?;
//!
//! // Delete a value
//! storage.delete("cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use kv::{validate_key, Storage};
pub use memory::MemoryStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStorage, MemoryStorage, Storage, StorageError};
}
