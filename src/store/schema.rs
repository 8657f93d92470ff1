//! Relational schema: tables, constraints, and versioned lifecycle.
//!
//! The schema version lives in SQLite's `user_version` pragma. On open, a
//! mismatched version drops every table and recreates the schema from
//! scratch. That migration policy is deliberately destructive: every row is
//! re-derivable from the source files by a full sync, so the rebuild is a
//! recovery-from-any-state primitive rather than a data-loss risk.

use rusqlite::Connection;

/// Expected schema version, stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 2;

/// Sentinel stored in the `master` column for document topics, which have no
/// identified ancestor.
pub const MASTER_SENTINEL: &str = "0";

/// Ensures the database carries the expected schema.
///
/// Creates missing tables when the version matches; drops and recreates
/// everything when it does not, then stamps the expected version.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    if schema_version(conn)? != SCHEMA_VERSION {
        drop_schema(conn)?;
        create_schema(conn)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    } else {
        create_schema(conn)?;
    }
    Ok(())
}

/// Returns the stamped schema version.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Creates all tables and indexes. Idempotent.
///
/// # Tables
/// - `nodes` - identified headlines and document topics
/// - `journal` - date-stamped entries, same shape as `nodes`
/// - `tags` - distinct tag labels, global identity
/// - `node_tags` / `journal_tags` - many-to-many junctions
/// - `links` - directed (source, dest) edges
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS nodes (
            id TEXT PRIMARY KEY,
            file TEXT NOT NULL,
            title TEXT NOT NULL,
            level INTEGER NOT NULL,
            master TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS journal (
            id TEXT PRIMARY KEY,
            file TEXT NOT NULL,
            title TEXT NOT NULL,
            level INTEGER NOT NULL,
            master TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS node_tags (
            node_id TEXT NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (node_id, tag_id)
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS journal_tags (
            entry_id TEXT NOT NULL REFERENCES journal(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (entry_id, tag_id)
        );",
    )?;

    // Both endpoints are unconstrained: dest may point at a node that does
    // not exist yet, and source may be a journal entry. The synchronizer
    // clears a file's outgoing edges whenever it deletes the file's rows.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS links (
            source TEXT NOT NULL,
            dest TEXT NOT NULL,
            UNIQUE (source, dest)
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_nodes_file ON nodes(file);
         CREATE INDEX IF NOT EXISTS idx_journal_file ON journal(file);
         CREATE INDEX IF NOT EXISTS idx_links_dest ON links(dest);
         CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(name);",
    )?;

    Ok(())
}

/// Drops every table the schema defines, in FK-safe order.
pub fn drop_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS links;
         DROP TABLE IF EXISTS node_tags;
         DROP TABLE IF EXISTS journal_tags;
         DROP TABLE IF EXISTS tags;
         DROP TABLE IF EXISTS journal;
         DROP TABLE IF EXISTS nodes;",
    )?;
    Ok(())
}
