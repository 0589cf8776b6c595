//! `cct init` command - Initialize a catalog database

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{CatalogStore, Config};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Re-seed an existing catalog instead of refusing
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = global
        .db
        .clone()
        .unwrap_or_else(|| Config::load().database_path());

    if path.exists() && !args.force {
        println!(
            "{} Catalog already exists at {}",
            style("!").yellow(),
            style(path.display()).cyan()
        );
        println!();
        println!("Use {} to re-seed it", style("cct init --force").yellow());
        return Ok(());
    }

    let store = CatalogStore::initialize(&path).map_err(|e| miette::miette!("{}", e))?;

    let categories = store.categories().map_err(|e| miette::miette!("{}", e))?;
    let rules = store
        .compatibility_rules()
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized catalog at {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    println!(
        "  {} categories, {} compatibility rules seeded",
        categories.len(),
        rules.len()
    );
    println!();
    println!("Next steps:");
    println!(
        "  {} Import a parts usage export",
        style("cct import usage.csv").yellow()
    );
    println!(
        "  {} Categorize anything the import couldn't",
        style("cct categorize").yellow()
    );
    println!(
        "  {} Fill in material/type/size attributes",
        style("cct extract --all").yellow()
    );
    println!(
        "  {} Build an assembly with compatibility checks",
        style("cct build").yellow()
    );

    Ok(())
}
