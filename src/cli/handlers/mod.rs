//! Command handlers for the CLI.

mod link;
mod new;
mod query;
mod remove;
mod sync;

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::cli::config::Config;
use crate::store::{NodeEntry, Store};

// Re-export public items
pub use link::handle_link;
pub use new::handle_new;
pub use query::{handle_backlinks, handle_find, handle_list, handle_tags};
pub use remove::handle_rm;
pub use sync::handle_sync;

/// Resolved directories and database location for one invocation.
pub struct Workspace {
    pub notes_dir: PathBuf,
    pub journal_dir: PathBuf,
    pub db_path: PathBuf,
}

impl Workspace {
    /// Resolves paths from config and the optional `--dir` override.
    pub fn from_config(config: &Config, cli_dir: Option<&PathBuf>) -> Self {
        let notes_dir = config.notes_dir(cli_dir);
        let journal_dir = config.journal_dir(&notes_dir);
        let db_path = config.db_path(&notes_dir);
        Self {
            notes_dir,
            journal_dir,
            db_path,
        }
    }

    /// Opens the store at the workspace's database path.
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.db_path)
            .with_context(|| format!("failed to open store at {}", self.db_path.display()))
    }
}

/// Resolves a node by identifier first, then by exact title.
///
/// Ambiguous titles are an error that lists the candidates; the caller is
/// expected to retry with an identifier.
pub(crate) fn resolve_node(store: &Store, query: &str) -> Result<NodeEntry> {
    if let Some(entry) = store.node_by_id(query)? {
        return Ok(entry);
    }

    let mut matches = store.nodes_titled(query)?;
    match matches.len() {
        0 => bail!("no node found for '{}'", query),
        1 => Ok(matches.remove(0)),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|e| e.id.as_str()).collect();
            bail!(
                "title '{}' is ambiguous; give an id instead: {}",
                query,
                ids.join(", ")
            )
        }
    }
}
