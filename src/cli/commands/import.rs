//! `cct import` command - Import a parts usage CSV export
//!
//! The spreadsheet export is expected to carry the vendor/part-number
//! columns plus the two rolling-usage columns. Headers are taken verbatim
//! (including the embedded line breaks the source spreadsheets have), so
//! the pipeline's lookup keys match the export exactly.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::import::{import_rows, ImportRow};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with the parts usage export
    pub file: PathBuf,
}

/// Read a CSV file into string-keyed rows, preserving headers verbatim
fn read_rows(path: &PathBuf) -> Result<Vec<ImportRow>> {
    let file = File::open(path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.into_diagnostic()?;
        let mut row = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            row.insert(
                header.to_string(),
                record.get(idx).unwrap_or("").to_string(),
            );
        }
        rows.push(row);
    }

    Ok(rows)
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;

    // A failure to read the input itself is the one hard failure here;
    // everything past this point degrades per-row
    let rows = read_rows(&args.file)?;

    if !global.quiet && resolve_format(global) != OutputFormat::Json {
        println!(
            "{} Importing {} rows from {}",
            style("→").blue(),
            rows.len(),
            style(args.file.display()).cyan()
        );
    }

    let stats = import_rows(&mut store, &rows);

    if resolve_format(global) == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        return Ok(());
    }

    println!("{} Import complete", style("✓").green());
    println!("  Total rows: {}", stats.total);
    println!("  Created:    {}", style(stats.created).green());
    println!("  Updated:    {}", style(stats.updated).yellow());
    if stats.errors > 0 {
        println!("  Errors:     {}", style(stats.errors).red());
    } else {
        println!("  Errors:     0");
    }

    Ok(())
}
