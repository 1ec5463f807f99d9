use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::emit::Language;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "ctlang")]
#[command(about = "Translate Cheat Engine tables into Python, C++ and C# address declarations")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without writing files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a cheat table into source code
    Convert(ConvertArgs),

    /// List the classified entries of a cheat table
    Inspect(InspectArgs),

    /// Initialize a ctlang.toml config file
    Init(InitArgs),
}

#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Cheat table to convert (.CT)
    pub input: PathBuf,

    /// Target language (python, cpp, csharp); defaults to the configured language
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    /// Output file path (defaults to the table name with the language extension)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the generated code to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Omit the generator banner
    #[arg(long)]
    pub no_banner: bool,
}

#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Cheat table to inspect (.CT)
    pub input: PathBuf,

    /// Emit one JSON object per entry
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}
