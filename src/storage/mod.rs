/// Storage layer for persisting habit data
///
/// The habit store only ever needs a small key-value surface: read a value,
/// write several values together, remove several keys together. SQLite backs
/// it on disk and an in-memory map backs it in tests.

pub mod sqlite;
pub mod memory;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use thiserror::Error;

/// Key holding the serialized habit list
pub const HABITS_KEY: &str = "habits";
/// Key holding the serialized completion records
pub const COMPLETIONS_KEY: &str = "completions";
/// Key holding the theme preference
pub const THEME_KEY: &str = "theme";
/// Key holding the notifications toggle
pub const NOTIFICATIONS_KEY: &str = "notifications";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Write failed for key '{key}'")]
    WriteFailed { key: String },
}

/// Trait defining the key-value interface the habit store persists through
///
/// Multi-key writes and removals are all-or-nothing: either every key is
/// updated or none is.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write several values in one atomic step
    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Remove several keys in one atomic step; absent keys are ignored
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Write a single value
    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.put_many(&[(key, value)])
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).put_many(entries)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        (**self).remove_many(keys)
    }
}
