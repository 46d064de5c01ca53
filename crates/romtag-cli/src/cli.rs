//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// romtag - keep archive labels in sync with an emulator catalog
#[derive(Parser, Debug)]
#[command(name = "romtag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output and debug-level run log
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: romtag.yml in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the cache directory
    #[arg(long, global = true, env = "ROMTAG_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Override the catalog XML file
    #[arg(long, global = true, env = "ROMTAG_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build missing metadata records from the catalog
    Build(BuildArgs),

    /// Resolve dependencies and update labels on every archive in a directory
    Tag(TagArgs),

    /// Print the stored record of one item
    Show(ShowArgs),

    /// Delete the query cache and record store
    Clean(CleanArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Item names to build (comma-separated, default: whole catalog)
    #[arg(short, long)]
    pub items: Option<String>,
}

/// Arguments for the tag command
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Directory holding the archives to label
    pub scan_dir: PathBuf,

    /// Check dependencies on disk and mark them +present / -missing.
    /// Without this flag dependencies are labelled without a prefix and are
    /// never reported missing, as if they were all present.
    #[arg(short = 'd', long)]
    pub check_deps: bool,

    /// Directory holding sample sets (samples are assumed present without it)
    #[arg(short, long)]
    pub samples: Option<PathBuf>,

    /// Treat every existing label as removable, not only romtag's own
    #[arg(long)]
    pub reset: bool,

    /// Show label changes without applying them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Item name
    pub item: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for show
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The stored `key:value` lines
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Show what would be removed without removing it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
