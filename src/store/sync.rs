//! Synchronization: transactional delete-then-reinsert of a file's rows.
//!
//! All rows for a file are replaced wholesale by each pass; no row is ever
//! mutated in place. Every per-file sync runs in one transaction, so the
//! database only ever holds the full old state or the full new state of a
//! file, never a mix.

use crate::extract::{FileRecords, file_name, process_file};
use crate::infra::{FsError, scan_org_files};
use crate::store::{MASTER_SENTINEL, Store, StoreError, StoreResult, Transaction};
use rusqlite::params;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which table a file's rows belong to, decided by its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A permanent note in the main directory.
    Note,
    /// A date-stamped entry in the journal directory.
    Journal,
}

impl FileKind {
    /// Classifies a file by location: anything under the journal directory
    /// is a journal entry, everything else a permanent note.
    pub fn classify(path: &Path, journal_dir: &Path) -> Self {
        if path.starts_with(journal_dir) {
            FileKind::Journal
        } else {
            FileKind::Note
        }
    }

    fn node_table(self) -> &'static str {
        match self {
            FileKind::Note => "nodes",
            FileKind::Journal => "journal",
        }
    }
}

/// Errors from synchronizing a file.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The file could not be read; parse problems never error, they yield
    /// partial records instead.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// A store failure, including constraint violations. The enclosing
    /// transaction has been rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for SyncError {
    fn from(e: rusqlite::Error) -> Self {
        SyncError::Store(StoreError::Database(e))
    }
}

/// Row counts from one file's synchronization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOutcome {
    /// Node (or journal) rows inserted, topic included.
    pub nodes: usize,
    /// Link rows inserted, master links included, duplicates not counted.
    pub links: usize,
}

/// A per-file failure inside a batch sync.
#[derive(Debug)]
pub struct SyncFileError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for SyncFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of a batch sync over the notes and journal directories.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Files synchronized successfully.
    pub synced: usize,
    /// Total node rows inserted.
    pub nodes: usize,
    /// Total link rows inserted.
    pub links: usize,
    /// Files whose rows were purged because the file no longer exists.
    pub pruned: usize,
    /// Files that failed; each failure left that file's prior rows intact.
    pub errors: Vec<SyncFileError>,
}

/// Reads, processes, and synchronizes one file.
pub fn sync_file(store: &mut Store, path: &Path, kind: FileKind) -> Result<SyncOutcome, SyncError> {
    let records = process_file(path)?;
    sync_records(store, &records, kind)
}

/// Replaces all persisted rows for a record set's file, atomically.
///
/// Deletes every existing row keyed by the file (outgoing links explicitly,
/// tag associations via cascade), then inserts the fresh set: node rows, tag
/// upserts and associations, master links, and extracted link pairs. Any
/// failure rolls the entire transaction back.
pub fn sync_records(
    store: &mut Store,
    records: &FileRecords,
    kind: FileKind,
) -> Result<SyncOutcome, SyncError> {
    let tx = store.transaction()?;
    let outcome = apply_records(&tx, records, kind)?;
    tx.commit()?;
    Ok(outcome)
}

fn apply_records(
    tx: &Transaction<'_>,
    records: &FileRecords,
    kind: FileKind,
) -> Result<SyncOutcome, SyncError> {
    let node_table = kind.node_table();
    // Outgoing edges have no FK back to the row tables, so they are cleared
    // explicitly before their sources go away.
    tx.execute(
        &format!(
            "DELETE FROM links
             WHERE source IN (SELECT id FROM {node_table} WHERE file = ?1)"
        ),
        [&records.file],
    )?;
    tx.execute(
        &format!("DELETE FROM {node_table} WHERE file = ?1"),
        [&records.file],
    )?;

    let mut outcome = SyncOutcome::default();

    for node in records.all_nodes() {
        let master = node.master().map_or(MASTER_SENTINEL, |m| m.as_str());
        tx.execute(
            &format!(
                "INSERT INTO {node_table} (id, file, title, level, master)
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            params![node.id().as_str(), node.file(), node.title(), node.level(), master],
        )?;
        outcome.nodes += 1;

        for tag in node.tags() {
            tx.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [tag.as_str()])?;
            let tag_id: i64 = tx.conn().query_row(
                "SELECT id FROM tags WHERE name = ?1",
                [tag.as_str()],
                |row| row.get(0),
            )?;
            let junction = match kind {
                FileKind::Note => "INSERT OR IGNORE INTO node_tags (node_id, tag_id) VALUES (?1, ?2)",
                FileKind::Journal => {
                    "INSERT OR IGNORE INTO journal_tags (entry_id, tag_id) VALUES (?1, ?2)"
                }
            };
            tx.execute(junction, params![node.id().as_str(), tag_id])?;
        }

        // Materialize the parent edge.
        if let Some(master) = node.master() {
            outcome.links += tx.execute(
                "INSERT OR IGNORE INTO links (source, dest) VALUES (?1, ?2)",
                params![node.id().as_str(), master.as_str()],
            )?;
        }
    }

    for link in &records.links {
        outcome.links += tx.execute(
            "INSERT OR IGNORE INTO links (source, dest) VALUES (?1, ?2)",
            params![link.source().as_str(), link.dest().as_str()],
        )?;
    }

    Ok(outcome)
}

/// Deletes every row keyed by a file name, from both tables, in one
/// transaction. Returns the number of node and journal rows removed.
pub fn purge_file(store: &mut Store, file: &str) -> StoreResult<usize> {
    let tx = store.transaction()?;
    let mut removed = 0;
    for table in ["nodes", "journal"] {
        tx.execute(
            &format!("DELETE FROM links WHERE source IN (SELECT id FROM {table} WHERE file = ?1)"),
            [file],
        )?;
        removed += tx.execute(&format!("DELETE FROM {table} WHERE file = ?1"), [file])?;
    }
    tx.commit()?;
    Ok(removed)
}

/// Synchronizes every eligible file under the notes and journal directories.
///
/// Each file gets its own independent transaction; one failure is recorded
/// and the batch continues, so an unrelated error never drops data for a
/// file that processed cleanly. Rows belonging to files that no longer exist
/// on disk are purged at the end.
pub fn sync_all(
    store: &mut Store,
    notes_dir: &Path,
    journal_dir: &Path,
) -> Result<SyncReport, SyncError> {
    let mut files: Vec<PathBuf> = scan_org_files(notes_dir)?;
    if !journal_dir.starts_with(notes_dir) {
        files.extend(scan_org_files(journal_dir)?);
    }

    let mut report = SyncReport::default();
    let mut present_notes = HashSet::new();
    let mut present_journal = HashSet::new();

    for path in &files {
        let kind = FileKind::classify(path, journal_dir);
        match kind {
            FileKind::Note => present_notes.insert(file_name(path)),
            FileKind::Journal => present_journal.insert(file_name(path)),
        };
        match sync_file(store, path, kind) {
            Ok(outcome) => {
                report.synced += 1;
                report.nodes += outcome.nodes;
                report.links += outcome.links;
            }
            Err(e) => report.errors.push(SyncFileError {
                path: path.clone(),
                message: e.to_string(),
            }),
        }
    }

    report.pruned += prune_missing(store, "nodes", &present_notes)?;
    report.pruned += prune_missing(store, "journal", &present_journal)?;

    Ok(report)
}

/// Purges rows for files the directory scan no longer found. Files that
/// failed this batch are still present on disk, so their rows survive.
fn prune_missing(
    store: &mut Store,
    table: &str,
    present: &HashSet<String>,
) -> Result<usize, SyncError> {
    let stored: Vec<String> = {
        let mut stmt = store
            .conn()
            .prepare(&format!("SELECT DISTINCT file FROM {table}"))?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<_, _>>()?
    };

    let mut pruned = 0;
    for file in stored {
        if !present.contains(&file) {
            let tx = store.transaction()?;
            tx.execute(
                &format!(
                    "DELETE FROM links
                     WHERE source IN (SELECT id FROM {table} WHERE file = ?1)"
                ),
                [&file],
            )?;
            tx.execute(&format!("DELETE FROM {table} WHERE file = ?1"), [&file])?;
            tx.commit()?;
            pruned += 1;
        }
    }
    Ok(pruned)
}
