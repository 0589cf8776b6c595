//! `cct bom` command - Assemble a BOM from part numbers and export it

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;
use crate::compat::Bom;

#[derive(clap::Args, Debug)]
pub struct BomArgs {
    /// Parts to include, as PART or PART:QTY
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Write the CSV to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Split a PART:QTY argument; a missing or unparseable quantity is 1
fn parse_item(raw: &str) -> (&str, u32) {
    match raw.rsplit_once(':') {
        Some((id, qty)) => match qty.parse::<u32>() {
            Ok(qty) => (id, qty.max(1)),
            Err(_) => (raw, 1),
        },
        None => (raw, 1),
    }
}

pub fn run(args: BomArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let categories: HashMap<i64, String> = store
        .categories()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .map(|cat| (cat.id, cat.name))
        .collect();

    let mut bom = Bom::new();

    for raw in &args.items {
        let (number, quantity) = parse_item(raw);
        let part = store
            .find_part_by_any_number(number)
            .map_err(|e| miette::miette!("{}", e))?
            .ok_or_else(|| miette::miette!("Part '{}' not found", number))?;

        let category = part
            .category_id
            .and_then(|id| categories.get(&id).cloned())
            .unwrap_or_else(|| "Uncategorized".to_string());

        let id = part.id.clone();
        bom.add(part, &category);
        if quantity > 1 {
            bom.set_quantity(&id, quantity);
        }
    }

    match args.output {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            bom.write_csv(file).into_diagnostic()?;
            println!(
                "{} Exported {} line(s) to {}",
                style("✓").green(),
                bom.len(),
                style(path.display()).cyan()
            );
        }
        None => {
            bom.write_csv(io::stdout()).into_diagnostic()?;
        }
    }

    Ok(())
}
