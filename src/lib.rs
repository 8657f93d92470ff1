//! loam - org outline notes mirrored into a relational store

pub mod cli;
pub mod domain;
pub mod extract;
pub mod infra;
pub mod org;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Workspace, handle_backlinks, handle_find, handle_link, handle_list, handle_new, handle_rm,
        handle_sync, handle_tags,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let ws = Workspace::from_config(&config, cli.dir.as_ref());

    match &cli.command {
        Command::Sync(args) => handle_sync(args, &ws, cli.verbose),
        Command::New(args) => handle_new(args, &ws),
        Command::Link(args) => handle_link(args, &ws),
        Command::Rm(args) => handle_rm(args, &ws),
        Command::Find(args) => handle_find(args, &ws),
        Command::Backlinks(args) => handle_backlinks(args, &ws),
        Command::Tags(args) => handle_tags(args, &ws),
        Command::List(args) => handle_list(args, &ws),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "loam", &mut std::io::stdout());
            Ok(())
        }
    }
}
