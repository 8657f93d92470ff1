//! Read-side queries: node lookup, backlinks, tag retrieval.

use crate::store::{MASTER_SENTINEL, Store, StoreResult};
use rusqlite::Row;
use serde::Serialize;

/// A node row as read back from the store, tags attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEntry {
    pub id: String,
    pub file: String,
    pub title: String,
    pub level: i64,
    /// Nearest identified ancestor; `None` for document topics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    pub tags: Vec<String>,
    /// True when the row lives in the journal table.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub journal: bool,
}

/// A tag with the number of nodes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}

fn entry_from_row(row: &Row<'_>, journal: bool) -> rusqlite::Result<NodeEntry> {
    let master: String = row.get(4)?;
    Ok(NodeEntry {
        id: row.get(0)?,
        file: row.get(1)?,
        title: row.get(2)?,
        level: row.get(3)?,
        master: (master != MASTER_SENTINEL).then_some(master),
        tags: Vec::new(),
        journal,
    })
}

const NODE_COLS: &str = "id, file, title, level, master";

impl Store {
    /// Looks up a node by exact identifier, checking notes then journal.
    pub fn node_by_id(&self, id: &str) -> StoreResult<Option<NodeEntry>> {
        for (table, journal) in [("nodes", false), ("journal", true)] {
            let mut stmt = self
                .conn()
                .prepare(&format!("SELECT {NODE_COLS} FROM {table} WHERE id = ?1"))?;
            let mut rows = stmt.query_map([id], |row| entry_from_row(row, journal))?;
            if let Some(entry) = rows.next().transpose()? {
                return Ok(Some(self.attach_tags(entry)?));
            }
        }
        Ok(None)
    }

    /// Finds note nodes whose title contains the query, case-insensitively.
    pub fn find_nodes(&self, query: &str) -> StoreResult<Vec<NodeEntry>> {
        // Escape the escape character before the wildcards.
        let escaped = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {NODE_COLS} FROM nodes
             WHERE title LIKE ?1 ESCAPE '\\'
             ORDER BY title, id"
        ))?;
        let rows = stmt.query_map([pattern], |row| entry_from_row(row, false))?;
        self.attach_all(rows.collect::<Result<_, _>>()?)
    }

    /// Finds note nodes with exactly this title.
    pub fn nodes_titled(&self, title: &str) -> StoreResult<Vec<NodeEntry>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {NODE_COLS} FROM nodes WHERE title = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map([title], |row| entry_from_row(row, false))?;
        self.attach_all(rows.collect::<Result<_, _>>()?)
    }

    /// Returns the nodes that link to the given identifier: every source of
    /// an edge whose dest is `id`. Journal entries source edges too, so they
    /// appear here alongside notes.
    pub fn backlinks(&self, id: &str) -> StoreResult<Vec<NodeEntry>> {
        let mut entries = Vec::new();
        for (table, journal) in [("nodes", false), ("journal", true)] {
            let mut stmt = self.conn().prepare(&format!(
                "SELECT {NODE_COLS} FROM {table}
                 WHERE id IN (SELECT source FROM links WHERE dest = ?1)
                 ORDER BY file, id"
            ))?;
            let rows = stmt.query_map([id], |row| entry_from_row(row, journal))?;
            entries.extend(rows.collect::<Result<Vec<_>, _>>()?);
        }
        self.attach_all(entries)
    }

    /// Every tag with its usage count across notes and journal entries.
    pub fn tags_with_counts(&self) -> StoreResult<Vec<TagCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT t.name,
                    (SELECT COUNT(*) FROM node_tags nt WHERE nt.tag_id = t.id)
                  + (SELECT COUNT(*) FROM journal_tags jt WHERE jt.tag_id = t.id)
             FROM tags t ORDER BY t.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TagCount {
                name: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Note nodes carrying the given tag.
    pub fn nodes_with_tag(&self, tag: &str) -> StoreResult<Vec<NodeEntry>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {NODE_COLS} FROM nodes
             WHERE id IN (
                 SELECT nt.node_id FROM node_tags nt
                 JOIN tags t ON t.id = nt.tag_id WHERE t.name = ?1
             )
             ORDER BY file, id"
        ))?;
        let rows = stmt.query_map([tag], |row| entry_from_row(row, false))?;
        self.attach_all(rows.collect::<Result<_, _>>()?)
    }

    /// Distinct file names with rows in the store, notes and journal together.
    pub fn files_in_store(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT file FROM nodes UNION SELECT file FROM journal ORDER BY file")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// All note nodes, in file then id order.
    pub fn all_nodes(&self) -> StoreResult<Vec<NodeEntry>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {NODE_COLS} FROM nodes ORDER BY file, id"))?;
        let rows = stmt.query_map([], |row| entry_from_row(row, false))?;
        self.attach_all(rows.collect::<Result<_, _>>()?)
    }

    fn attach_all(&self, entries: Vec<NodeEntry>) -> StoreResult<Vec<NodeEntry>> {
        entries.into_iter().map(|e| self.attach_tags(e)).collect()
    }

    fn attach_tags(&self, mut entry: NodeEntry) -> StoreResult<NodeEntry> {
        let sql = if entry.journal {
            "SELECT t.name FROM journal_tags jt JOIN tags t ON t.id = jt.tag_id
             WHERE jt.entry_id = ?1 ORDER BY t.name"
        } else {
            "SELECT t.name FROM node_tags nt JOIN tags t ON t.id = nt.tag_id
             WHERE nt.node_id = ?1 ORDER BY t.name"
        };
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([&entry.id], |row| row.get(0))?;
        entry.tags = rows.collect::<Result<_, _>>()?;
        Ok(entry)
    }
}
