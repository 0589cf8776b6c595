//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bom::BomArgs,
    build::BuildArgs,
    categorize::CategorizeArgs,
    category::CategoryCommands,
    check::CheckArgs,
    completions::CompletionsArgs,
    extract::ExtractArgs,
    import::ImportArgs,
    init::InitArgs,
    part::PartCommands,
    status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "cct")]
#[command(author, version, about = "Caster Catalog Toolkit")]
#[command(long_about = "A toolkit for managing an industrial caster parts catalog: bulk usage \
import, automatic categorization and attribute extraction, compatibility checking, and BOM \
export.")]
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

    /// Catalog database path (default: catalog.db, or CCT_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a catalog database with the reference data
    Init(InitArgs),

    /// Category reference data
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Part management
    #[command(subcommand)]
    Part(PartCommands),

    /// Import a parts usage CSV export
    Import(ImportArgs),

    /// Extract material/type/size attributes from part identifiers
    Extract(ExtractArgs),

    /// Assign categories to uncategorized parts by part number prefix
    Categorize(CategorizeArgs),

    /// Check a set of selected parts against the compatibility rules
    Check(CheckArgs),

    /// Interactively build an assembly with live compatibility warnings
    Build(BuildArgs),

    /// Assemble a BOM from part numbers and export it as CSV
    Bom(BomArgs),

    /// Show catalog status dashboard
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
