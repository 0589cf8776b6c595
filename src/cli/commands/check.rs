//! `cct check` command - Check selected parts against the compatibility rules

use std::collections::HashMap;

use console::style;
use miette::Result;

use crate::cli::helpers::{load_rules, open_store};
use crate::cli::GlobalOpts;
use crate::compat::CompatSession;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Part numbers to check together (at most one per category is used;
    /// a later part replaces an earlier one in the same category)
    #[arg(required = true)]
    pub parts: Vec<String>,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let categories: HashMap<i64, String> = store
        .categories()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .map(|cat| (cat.id, cat.name))
        .collect();

    let mut session = CompatSession::new(load_rules(&store));

    for number in &args.parts {
        let part = store
            .find_part_by_any_number(number)
            .map_err(|e| miette::miette!("{}", e))?
            .ok_or_else(|| miette::miette!("Part '{}' not found", number))?;

        let Some(category) = part.category_id.and_then(|id| categories.get(&id)) else {
            eprintln!(
                "{} {} is uncategorized and cannot be checked",
                style("!").yellow(),
                number
            );
            continue;
        };

        if !global.quiet {
            println!(
                "{} {} selected for {}",
                style("→").blue(),
                style(&part.id).cyan(),
                category
            );
        }
        session.select_part(category, part);
    }

    let warnings = session.evaluate().to_vec();

    if warnings.is_empty() {
        println!(
            "{} No compatibility issues across {} selection(s)",
            style("✓").green(),
            session.selected_parts().len()
        );
        return Ok(());
    }

    for warning in &warnings {
        println!("{} {}", style("⚠").yellow(), warning);
    }

    Err(miette::miette!(
        "{} compatibility violation(s) found",
        warnings.len()
    ))
}
