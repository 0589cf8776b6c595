//! `cct category` command - Category reference data

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    List,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 20),
    ColumnDef::new("description", "DESCRIPTION", 48),
];

pub fn run(cmd: CategoryCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CategoryCommands::List => run_list(global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let categories = store.categories().map_err(|e| miette::miette!("{}", e))?;

    match resolve_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&categories).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&categories).into_diagnostic()?);
        }
        format => {
            let rows = categories
                .into_iter()
                .map(|cat| {
                    TableRow::new(cat.id.to_string())
                        .cell("id", CellValue::Number(cat.id))
                        .cell("name", CellValue::Text(cat.name))
                        .cell("description", CellValue::Text(cat.description))
                })
                .collect();

            let formatter = TableFormatter::new(COLUMNS, "category");
            let formatter = if global.quiet {
                formatter.without_summary()
            } else {
                formatter
            };
            formatter.output(rows, format);
        }
    }

    Ok(())
}
