/// SQLite implementation of the key-value storage interface
///
/// Values are stored as text in a single `kv` table. Multi-key writes run
/// inside one transaction.

use std::path::PathBuf;
use rusqlite::{Connection, OptionalExtension, params};
use chrono::Utc;

use crate::storage::{KeyValueStore, StorageError, migrations};

/// SQLite-based storage implementation
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and run any necessary migrations
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(value)
    }

    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;

        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
        }

        tx.commit()?;

        tracing::debug!("Wrote {} key(s)", entries.len());
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        for key in keys {
            tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        }

        tx.commit()?;

        tracing::debug!("Removed {} key(s)", keys.len());
        Ok(())
    }
}
