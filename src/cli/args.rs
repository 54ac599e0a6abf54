//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, export::ExportArgs,
    inventory::InventoryArgs, parts::PartsArgs,
};

#[derive(Parser)]
#[command(name = "slopes")]
#[command(author, version, about = "Slope brick inventory reconciliation")]
#[command(long_about = "Reconciles a hand-kept slope brick inventory against the element catalog and exports a deterministic CSV table.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory with reference tables overriding the built-in ones
    #[arg(long, global = true, env = "SLOPES_DATA_DIR")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up every design id and write the export table
    Export(ExportArgs),

    /// Show the normalized inventory (no network access)
    Inventory(InventoryArgs),

    /// Validate the reference tables (no network access)
    Check(CheckArgs),

    /// List the part catalog
    Parts(PartsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table for the terminal
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
