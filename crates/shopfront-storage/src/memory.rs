//! In-memory storage.

use crate::kv::validate_key;
use crate::{Storage, StorageError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage kept in process memory.
///
/// Clones share the same slots, so a test can hand one handle to a cart
/// and inspect what was written through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one raw value.
    pub fn with_value(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slots.borrow_mut().insert(key.into(), raw.into());
        storage
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Check if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
