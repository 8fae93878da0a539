use std::cell::RefCell;
use std::collections::HashMap;

use crate::storage::{KeyValueStore, StorageError};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// so the `KeyValueStore` trait can keep `&self` on every method.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw value for a key, bypassing error simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if *self.simulate_write_error.borrow() {
            return Err(StorageError::WriteFailed { key: key.to_string() });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        if let Some((key, _)) = entries.first() {
            self.check_writable(key)?;
        }
        let mut values = self.values.borrow_mut();
        for (key, value) in entries {
            values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        if let Some(key) = keys.first() {
            self.check_writable(key)?;
        }
        let mut values = self.values.borrow_mut();
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}
