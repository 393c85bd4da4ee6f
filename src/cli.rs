//! CLI Argument Parsing
//!
//! A single command: one generation pass, or `--watch` for continuous
//! regeneration.

use std::path::PathBuf;

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// compdoc - component metadata generator
#[derive(Parser, Debug)]
#[command(name = "compdoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep running and regenerate when components or examples change
    #[arg(short, long)]
    pub watch: bool,

    /// Project root the configured paths are relative to (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Components directory (overrides config)
    #[arg(long)]
    pub components: Option<PathBuf>,

    /// Examples directory (overrides config)
    #[arg(long)]
    pub examples: Option<PathBuf>,

    /// Output file (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: <root>/compdoc.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events instead of console output
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
