//! Persistence: schema lifecycle, transactions, synchronization, queries.

mod query;
mod schema;
mod sync;
mod transaction;

pub use query::{NodeEntry, TagCount};
pub use schema::{MASTER_SENTINEL, SCHEMA_VERSION, create_schema, drop_schema, init_schema, schema_version};
pub use sync::{
    FileKind, SyncError, SyncFileError, SyncOutcome, SyncReport, purge_file, sync_all, sync_file,
    sync_records,
};
pub use transaction::Transaction;

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error, including constraint violations. When raised inside
    /// a synchronization transaction the whole transaction rolls back.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the embedded database.
///
/// Opened once and passed explicitly to everything that touches persisted
/// state; there is no ambient global connection. All writes go through
/// [`Store::transaction`].
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens an in-memory store with the schema initialized. For tests and
    /// throwaway work.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens or creates the database at the given path.
    ///
    /// Creates parent directories as needed. The schema version is checked
    /// here; a mismatch rebuilds the schema destructively (see
    /// [`init_schema`]).
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns the underlying connection for read queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begins a write transaction. Rolls back on drop unless committed.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }
}
