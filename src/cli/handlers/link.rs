//! Handler for the `link` command.

use anyhow::{Context, Result};

use crate::cli::LinkArgs;
use crate::cli::handlers::{Workspace, resolve_node};
use crate::infra::append_line;
use crate::store::{FileKind, sync_file};

pub fn handle_link(args: &LinkArgs, ws: &Workspace) -> Result<()> {
    let mut store = ws.open_store()?;
    let entry = resolve_node(&store, &args.target)?;
    let link = format!("[[id:{}][{}]]", entry.id, entry.title);

    let Some(into) = args.into.as_ref() else {
        println!("{link}");
        return Ok(());
    };

    append_line(into, &link).with_context(|| format!("failed to append to {}", into.display()))?;

    // The file just changed on disk; bring its rows back in step.
    let kind = FileKind::classify(into, &ws.journal_dir);
    sync_file(&mut store, into, kind)
        .with_context(|| format!("failed to sync {}", into.display()))?;

    println!("Appended {} to {}", link, into.display());
    Ok(())
}
