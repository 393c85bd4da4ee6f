//! compdoc CLI - component metadata generator
//!
//! Usage: compdoc [--watch] [OPTIONS]

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.watch {
        commands::watch::cmd_watch(&cli)
    } else {
        commands::generate::cmd_generate(&cli)
    }
}
