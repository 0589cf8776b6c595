//! `cct status` command - Catalog status dashboard

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let categories = store.categories().map_err(|e| miette::miette!("{}", e))?;
    let total = store.count_parts().map_err(|e| miette::miette!("{}", e))?;
    let uncategorized = store
        .count_uncategorized()
        .map_err(|e| miette::miette!("{}", e))?;
    let awaiting = store
        .count_extraction_candidates()
        .map_err(|e| miette::miette!("{}", e))?;
    let rules = store
        .compatibility_rules()
        .map_err(|e| miette::miette!("{}", e))?;

    println!("{}", style("Catalog Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Total parts:         {}", style(total).cyan());
    println!("  Uncategorized:       {}", style(uncategorized).cyan());
    println!("  Awaiting extraction: {}", style(awaiting).cyan());
    println!("  Compatibility rules: {}", style(rules.len()).cyan());

    if !categories.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Parts"]);
        for category in &categories {
            let count = store
                .count_parts_in_category(category.id)
                .map_err(|e| miette::miette!("{}", e))?;
            builder.push_record([category.name.clone(), count.to_string()]);
        }

        println!();
        println!("{}", builder.build().with(Style::markdown()));
    }

    if uncategorized > 0 && !global.quiet {
        println!();
        println!(
            "{} Run {} to assign categories by prefix",
            style("!").yellow(),
            style("cct categorize").yellow()
        );
    }
    if awaiting > 0 && !global.quiet {
        println!(
            "{} Run {} to fill in part attributes",
            style("!").yellow(),
            style("cct extract --all").yellow()
        );
    }

    Ok(())
}
