//! Handler for the `rm` command: purge a file's rows, then the file.

use anyhow::{Context, Result};

use crate::cli::RmArgs;
use crate::cli::handlers::Workspace;
use crate::extract::file_name;
use crate::store::purge_file;

pub fn handle_rm(args: &RmArgs, ws: &Workspace) -> Result<()> {
    let mut store = ws.open_store()?;
    let file = file_name(&args.path);

    // Rows first. If the file deletion then fails, a later sync pass simply
    // re-adds the rows; the opposite order could strand rows forever.
    let removed = purge_file(&mut store, &file)?;

    if !args.keep_file && args.path.exists() {
        std::fs::remove_file(&args.path)
            .with_context(|| format!("failed to delete {}", args.path.display()))?;
    }

    println!("Purged {removed} row(s) for {file}");
    Ok(())
}
