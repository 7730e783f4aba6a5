use std::ops::Deref;
use std::sync::MutexGuard;

use rusqlite::Connection;

use crate::error::Result;

/// An open transaction holding the connection for its whole lifetime.
///
/// Dropping a `Tx` that was not committed issues `ROLLBACK`. A failed
/// rollback is logged and otherwise ignored, so the caller always sees the
/// error that caused the unwind rather than a cleanup failure.
pub struct Tx<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl<'a> Tx<'a> {
    pub(super) fn begin(conn: MutexGuard<'a, Connection>) -> Result<Self> {
        conn.execute_batch("BEGIN")?;
        tracing::debug!("transaction started");
        Ok(Self {
            conn,
            finished: false,
        })
    }

    pub fn commit(mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Rolls back explicitly. Equivalent to dropping the transaction.
    pub fn rollback(mut self) {
        self.rollback_in_place();
    }

    fn rollback_in_place(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => tracing::debug!("transaction rolled back"),
            Err(e) => tracing::warn!("Failed to roll back transaction: {e}"),
        }
    }
}

impl Deref for Tx<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for Tx<'_> {
    fn drop(&mut self) {
        self.rollback_in_place();
    }
}
