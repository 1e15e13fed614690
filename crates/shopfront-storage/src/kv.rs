//! Key-value slot trait with automatic JSON serialization.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// A durable key-value store holding one string value per key.
///
/// Implementations take `&self` for writes; a store is owned by a single
/// execution context and needs no locking.
pub trait Storage {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// Get a value, deserializing it from JSON.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<serde_json::Value>> = storage.get("cart")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value, serializing it to JSON.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// storage.set("cart", &lines)?;
    /// ```
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Check that a key can name a slot on every backend.
///
/// Keys are non-empty and limited to ASCII alphanumerics, `_`, `-` and `.`,
/// and may not start with `.`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_simple_names() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart-guest_1.v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("cart key").is_err());
    }
}
