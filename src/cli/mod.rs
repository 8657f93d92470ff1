//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// loam - org outline notes mirrored into a relational store
#[derive(Parser, Debug)]
#[command(name = "loam", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize one file, or every note and journal file
    Sync(SyncArgs),

    /// Find a node by title, creating its file when absent
    New(NewArgs),

    /// Print (or append) a link to a node
    Link(LinkArgs),

    /// Delete a file's rows from the store, and optionally the file
    Rm(RmArgs),

    /// Find nodes by title substring
    Find(FindArgs),

    /// Show nodes that link to a given node
    Backlinks(BacklinksArgs),

    /// List all tags with usage counts
    Tags(TagsArgs),

    /// List nodes, optionally filtered by tag
    #[command(name = "ls")]
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `sync` command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// File to synchronize; omit with --all for a full batch sync
    pub path: Option<PathBuf>,

    /// Synchronize every eligible file in the notes and journal directories
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Title of the node to find or create
    pub title: Option<String>,

    /// Use (or create) today's journal file instead of a note
    #[arg(long)]
    pub journal: bool,
}

/// Arguments for the `link` command
#[derive(Parser, Debug)]
pub struct LinkArgs {
    /// Target node, by identifier or exact title
    pub target: String,

    /// Append the link to this file instead of printing it
    #[arg(long)]
    pub into: Option<PathBuf>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// File whose rows should be purged
    pub path: PathBuf,

    /// Purge the rows but leave the file on disk
    #[arg(long)]
    pub keep_file: bool,
}

/// Arguments for the `find` command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Title substring to search for
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Node to inspect, by identifier or exact title
    pub node: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Filter by tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
