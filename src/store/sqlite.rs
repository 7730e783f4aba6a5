use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::Tx;
use super::schema::SCHEMA;
use crate::error::Result;

/// SQLite-backed storage shared by every request.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        self.initialize_with_extensions(&[])
    }

    /// Applies the schema followed by caller-supplied SQL.
    pub fn initialize_with_extensions(&self, extensions: &[&str]) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA)?;
        for extension in extensions {
            conn.execute_batch(extension)?;
        }
        Ok(())
    }

    /// Returns a guard to the underlying database connection.
    /// Must be released before calling [`SqliteStore::begin`].
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a transaction that rolls back unless committed.
    pub fn begin(&self) -> Result<Tx<'_>> {
        Tx::begin(self.conn())
    }
}
