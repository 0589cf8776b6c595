//! `cct build` command - Interactive assembly builder
//!
//! Walks the user through selecting one part per category, surfacing
//! compatibility warnings after every selection, and collects the chosen
//! parts into a BOM that can be exported at the end.

use std::fs::File;
use std::path::PathBuf;

use console::style;
use dialoguer::{Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::catalog::Part;
use crate::cli::helpers::{load_rules, open_store};
use crate::cli::GlobalOpts;
use crate::compat::{Bom, CompatSession};

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Export the finished BOM to this file without prompting
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: BuildArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let categories = store.categories().map_err(|e| miette::miette!("{}", e))?;
    if categories.is_empty() {
        return Err(miette::miette!(
            "No categories found; run `cct init` first"
        ));
    }

    let mut session = CompatSession::new(load_rules(&store));
    let mut bom = Bom::new();

    loop {
        let mut menu: Vec<String> = categories
            .iter()
            .map(|cat| {
                match session.selection(&cat.name) {
                    Some(part) => format!("{} ({})", cat.name, part.id),
                    None => cat.name.clone(),
                }
            })
            .collect();
        menu.push("Review & finish".to_string());

        let choice = Select::new()
            .with_prompt("Select a category")
            .items(&menu)
            .default(0)
            .interact()
            .into_diagnostic()?;

        if choice == menu.len() - 1 {
            break;
        }

        let category = &categories[choice];
        let parts = store
            .parts_for_category(category.id)
            .map_err(|e| miette::miette!("{}", e))?;
        if parts.is_empty() {
            println!(
                "{} No parts in {} yet",
                style("!").yellow(),
                category.name
            );
            continue;
        }

        let labels: Vec<String> = parts.iter().map(part_label).collect();
        let pick = Select::new()
            .with_prompt(format!("Select a part for {}", category.name))
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let part = parts[pick].clone();

        let warnings = session.select_part(&category.name, part.clone()).to_vec();
        if warnings.is_empty() {
            println!("{} Selection is compatible", style("✓").green());
        } else {
            for warning in &warnings {
                println!("{} {}", style("⚠").yellow(), warning);
            }
        }

        let add = Confirm::new()
            .with_prompt("Add to BOM?")
            .default(true)
            .interact()
            .into_diagnostic()?;
        if add {
            bom.add(part, &category.name);
        }
    }

    if bom.is_empty() {
        println!("Nothing selected; no BOM to export.");
        return Ok(());
    }

    print_bom_table(&bom);

    let warnings = session.evaluate().to_vec();
    if !warnings.is_empty() {
        println!();
        for warning in &warnings {
            println!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let output = match args.output {
        Some(path) => Some(path),
        None => {
            let export = Confirm::new()
                .with_prompt("Export BOM to CSV?")
                .default(true)
                .interact()
                .into_diagnostic()?;
            if export {
                let path: String = Input::new()
                    .with_prompt("Output file")
                    .default("bom.csv".to_string())
                    .interact_text()
                    .into_diagnostic()?;
                Some(PathBuf::from(path))
            } else {
                None
            }
        }
    };

    if let Some(path) = output {
        let file = File::create(&path).into_diagnostic()?;
        bom.write_csv(file).into_diagnostic()?;
        println!(
            "{} Exported {} line(s) to {}",
            style("✓").green(),
            bom.len(),
            style(path.display()).cyan()
        );
    }

    Ok(())
}

fn part_label(part: &Part) -> String {
    let mut details: Vec<&str> = Vec::new();
    if let Some(ref material) = part.material {
        details.push(material);
    }
    if let Some(ref part_type) = part.part_type {
        details.push(part_type);
    }
    if let Some(ref size) = part.size {
        details.push(size);
    }

    if details.is_empty() {
        format!("{} - {}", part.id, part.name)
    } else {
        format!("{} - {} [{}]", part.id, part.name, details.join(", "))
    }
}

fn print_bom_table(bom: &Bom) {
    let mut builder = Builder::default();
    builder.push_record(["Part Number", "Name", "Category", "Qty"]);
    for item in bom.items() {
        builder.push_record([
            item.part.part_number.clone(),
            item.part.name.clone(),
            item.category_name.clone(),
            item.quantity.to_string(),
        ]);
    }

    println!();
    println!("{}", style("Bill of Materials").bold());
    println!("{}", builder.build().with(Style::markdown()));
}
