//! RAII transaction wrapper over the store connection.

use crate::store::StoreResult;
use rusqlite::{Connection, Params};

/// A write transaction with automatic rollback on drop.
///
/// Opened with `BEGIN IMMEDIATE` so the write lock is taken up front:
/// synchronization transactions are serialized at the database, matching the
/// single-writer model the schema assumes. Dropping without `commit()` rolls
/// everything back, which is what makes per-file synchronization atomic.
pub struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(conn: &'a Connection) -> StoreResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Returns the underlying connection, for queries inside the transaction.
    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    /// Executes a SQL statement, returning the number of rows affected.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Commits the transaction, consuming it.
    pub fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }

    /// Rolls back explicitly. Equivalent to dropping, but states the intent.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Rollback failure in drop has nowhere to go; ignore it.
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
