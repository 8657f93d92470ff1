//! Handler for the `sync` command.

use anyhow::{Context, Result};

use crate::cli::SyncArgs;
use crate::cli::handlers::Workspace;
use crate::extract::file_name;
use crate::store::{FileKind, sync_all, sync_file};

pub fn handle_sync(args: &SyncArgs, ws: &Workspace, verbose: u8) -> Result<()> {
    let mut store = ws.open_store()?;

    // A bare `sync` with no path behaves like `sync --all`.
    let Some(path) = args.path.as_ref().filter(|_| !args.all) else {
        let report = sync_all(&mut store, &ws.notes_dir, &ws.journal_dir)
            .with_context(|| format!("failed to sync {}", ws.notes_dir.display()))?;

        println!(
            "Synced {} file(s): {} node(s), {} link(s)",
            report.synced, report.nodes, report.links
        );
        if report.pruned > 0 {
            println!("Pruned {} deleted file(s)", report.pruned);
        }
        for error in &report.errors {
            eprintln!("warning: {error}");
        }
        if !report.errors.is_empty() {
            eprintln!("{} file(s) failed; their previous rows are intact", report.errors.len());
        }
        return Ok(());
    };

    let kind = FileKind::classify(path, &ws.journal_dir);
    let outcome = sync_file(&mut store, path, kind)
        .with_context(|| format!("failed to sync {}", path.display()))?;

    if verbose > 0 {
        println!(
            "Synced {} as {}: {} node(s), {} link(s)",
            path.display(),
            file_name(path),
            outcome.nodes,
            outcome.links
        );
    } else {
        println!(
            "Synced {} ({} nodes, {} links)",
            path.display(),
            outcome.nodes,
            outcome.links
        );
    }
    Ok(())
}
