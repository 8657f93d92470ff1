//! Handlers for the read-only commands: find, backlinks, tags, ls.

use anyhow::{Context, Result};

use crate::cli::handlers::{Workspace, resolve_node};
use crate::cli::output::{Output, OutputFormat, truncate_str};
use crate::cli::{BacklinksArgs, FindArgs, ListArgs, TagsArgs};
use crate::store::{NodeEntry, TagCount};

pub fn handle_find(args: &FindArgs, ws: &Workspace) -> Result<()> {
    let store = ws.open_store()?;
    let entries = store.find_nodes(&args.query)?;
    print_entries(&entries, args.format)
}

pub fn handle_backlinks(args: &BacklinksArgs, ws: &Workspace) -> Result<()> {
    let store = ws.open_store()?;
    let entry = resolve_node(&store, &args.node)?;
    let entries = store.backlinks(&entry.id)?;
    print_entries(&entries, args.format)
}

pub fn handle_tags(args: &TagsArgs, ws: &Workspace) -> Result<()> {
    let store = ws.open_store()?;
    let tags = store.tags_with_counts()?;

    match args.format {
        OutputFormat::Json => print_json(&tags)?,
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags");
                return Ok(());
            }
            let width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
            for TagCount { name, count } in &tags {
                println!("{name:width$}  {count}");
            }
        }
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, ws: &Workspace) -> Result<()> {
    let store = ws.open_store()?;
    let entries = match args.tag.as_deref() {
        Some(tag) => store.nodes_with_tag(tag)?,
        None => store.all_nodes()?,
    };
    print_entries(&entries, args.format)
}

fn print_entries(entries: &[NodeEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(entries),
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No nodes found");
                return Ok(());
            }
            for entry in entries {
                let tags = if entry.tags.is_empty() {
                    String::new()
                } else {
                    format!("  :{}:", entry.tags.join(":"))
                };
                println!(
                    "{:28}  {:40}  {}{}",
                    truncate_str(&entry.id, 28),
                    truncate_str(&entry.title, 40),
                    entry.file,
                    tags
                );
            }
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<()> {
    let output = Output::new(data);
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to serialize output")?
    );
    Ok(())
}
