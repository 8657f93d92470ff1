//! Handler for the `new` command: find a node by title, creating it if absent.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use ulid::Ulid;

use crate::cli::NewArgs;
use crate::cli::handlers::Workspace;
use crate::extract::file_name;
use crate::infra::{scan_org_files, slugify, write_text};
use crate::store::{FileKind, Store, sync_file};

pub fn handle_new(args: &NewArgs, ws: &Workspace) -> Result<()> {
    let mut store = ws.open_store()?;

    if args.journal {
        return today_journal(&mut store, ws);
    }

    let title = args
        .title
        .as_deref()
        .context("a title is required unless --journal is given")?;

    // Find-or-create: an existing node with this exact title wins.
    let existing = store.nodes_titled(title)?;
    if let Some(entry) = existing.first() {
        println!("{}", existing_note_path(ws, &entry.file)?.display());
        return Ok(());
    }

    let id = Ulid::new().to_string();
    let path = fresh_note_path(ws, title, &id);
    let content = note_template(&id, title);
    write_text(&path, &content).with_context(|| format!("failed to create {}", path.display()))?;

    sync_file(&mut store, &path, FileKind::Note)
        .with_context(|| format!("failed to sync {}", path.display()))?;

    println!("{}", path.display());
    Ok(())
}

/// Opens (or creates and syncs) today's journal entry.
fn today_journal(store: &mut Store, ws: &Workspace) -> Result<()> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let path = ws.journal_dir.join(format!("{date}.org"));

    if !path.exists() {
        let id = Ulid::new().to_string();
        let content = note_template(&id, &date);
        write_text(&path, &content)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }

    sync_file(store, &path, FileKind::Journal)
        .with_context(|| format!("failed to sync {}", path.display()))?;

    println!("{}", path.display());
    Ok(())
}

/// Locates an existing note by its stored file name. Row keys are bare file
/// names, but the file itself may live in a subdirectory of the notes dir.
fn existing_note_path(ws: &Workspace, file: &str) -> Result<PathBuf> {
    let files = scan_org_files(&ws.notes_dir)?;
    Ok(files
        .into_iter()
        .find(|p| file_name(p) == file)
        .unwrap_or_else(|| ws.notes_dir.join(file)))
}

/// Picks a slug-derived path, suffixing with the identifier when the slug is
/// already taken by another file.
fn fresh_note_path(ws: &Workspace, title: &str, id: &str) -> PathBuf {
    let slug = slugify(title);
    let path = ws.notes_dir.join(format!("{slug}.org"));
    if !path.exists() {
        return path;
    }
    ws.notes_dir.join(format!("{slug}-{}.org", id.to_lowercase()))
}

fn note_template(id: &str, title: &str) -> String {
    format!(":PROPERTIES:\n:ID: {id}\n:END:\n#+TITLE: {title}\n")
}
