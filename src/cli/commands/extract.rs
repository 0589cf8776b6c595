//! `cct extract` command - Run the attribute extraction pass

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::import::extract::{run_extraction_pass, ExtractionStats, EXTRACTION_BATCH_LIMIT};

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Keep running passes until no further parts can be enriched
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: ExtractArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;

    let mut combined = ExtractionStats::default();
    let mut passes = 0;

    loop {
        let stats = run_extraction_pass(&mut store).map_err(|e| miette::miette!("{}", e))?;
        passes += 1;

        combined.total += stats.total;
        combined.updated += stats.updated;
        combined.with_material += stats.with_material;
        combined.with_type += stats.with_type;
        combined.with_size += stats.with_size;

        if !global.quiet && resolve_format(global) != OutputFormat::Json && args.all && stats.updated > 0 {
            println!(
                "{} Pass {}: {} of {} parts updated",
                style("→").blue(),
                passes,
                stats.updated,
                stats.total
            );
        }

        // Stop when a pass makes no progress: either no candidates remain
        // or the remaining ones have nothing detectable
        if !args.all || stats.updated == 0 {
            break;
        }
    }

    if resolve_format(global) == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&combined).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{} Attribute extraction complete", style("✓").green());
    println!("  Parts scanned:     {}", combined.total);
    println!("  Parts updated:     {}", style(combined.updated).green());
    println!("  Material detected: {}", combined.with_material);
    println!("  Type detected:     {}", combined.with_type);
    println!("  Size detected:     {}", combined.with_size);

    if !args.all && combined.total == EXTRACTION_BATCH_LIMIT {
        println!();
        println!(
            "{} Each run handles up to {} parts; run again (or use {}) to continue.",
            style("!").yellow(),
            EXTRACTION_BATCH_LIMIT,
            style("cct extract --all").yellow()
        );
    }

    Ok(())
}
