//! `cct categorize` command - Assign categories by part number prefix

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::import::categorize_uncategorized;

#[derive(clap::Args, Debug)]
pub struct CategorizeArgs {}

pub fn run(_args: CategorizeArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;

    let stats = categorize_uncategorized(&mut store).map_err(|e| miette::miette!("{}", e))?;

    if resolve_format(global) == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        return Ok(());
    }

    println!("{} Categorization complete", style("✓").green());
    println!("  Uncategorized parts: {}", stats.total);
    println!("  Categorized:         {}", style(stats.categorized).green());
    println!("  Skipped (no match):  {}", stats.skipped);

    if stats.skipped > 0 {
        println!();
        println!(
            "{} {} part(s) matched no prefix rule; review them with {}",
            style("!").yellow(),
            stats.skipped,
            style("cct part list -f id").yellow()
        );
    }

    Ok(())
}
