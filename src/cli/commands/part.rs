//! `cct part` command - Part management

use std::collections::HashMap;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::{generate_part_number, Part};
use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CatalogStore, PartFilter};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List parts with filtering
    List(ListArgs),

    /// Show a part's details
    Show(ShowArgs),

    /// Add a part to the catalog
    Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category (name or id)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by material
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Filter by type
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub part_type: Option<String>,

    /// Filter by vendor
    #[arg(long)]
    pub vendor: Option<String>,

    /// Search in id, part number, and name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part id, part number, or internal part number
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Category (name or id)
    #[arg(long, short = 'c')]
    pub category: String,

    /// Manufacturer part number (generated from the attributes if omitted)
    #[arg(long, short = 'p')]
    pub part_number: Option<String>,

    #[arg(long, short = 'm')]
    pub material: Option<String>,

    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub part_type: Option<String>,

    #[arg(long, short = 's')]
    pub size: Option<String>,

    /// Bearing type (Wheels only)
    #[arg(long)]
    pub bearing_type: Option<String>,

    #[arg(long)]
    pub load_capacity: Option<String>,

    #[arg(long)]
    pub vendor: Option<String>,

    /// Equivalent competitor part numbers (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub competitor_parts: Vec<String>,

    /// Wheel part numbers this part pairs with (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub compatible_wheels: Vec<String>,

    /// Rig part numbers this part pairs with (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub compatible_rigs: Vec<String>,

    /// Free-text requirements not covered by the rule set
    #[arg(long)]
    pub other_requirements: Option<String>,

    /// This part needs a Zerk axle
    #[arg(long)]
    pub requires_zerk_axle: bool,

    /// This part needs stainless steel companion components
    #[arg(long)]
    pub requires_stainless: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 24),
    ColumnDef::new("name", "NAME", 32),
    ColumnDef::new("category", "CATEGORY", 14),
    ColumnDef::new("material", "MATERIAL", 18),
    ColumnDef::new("type", "TYPE", 14),
    ColumnDef::new("size", "SIZE", 12),
    ColumnDef::new("vendor", "VENDOR", 14),
];

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::List(args) => run_list(args, global),
        PartCommands::Show(args) => run_show(args, global),
        PartCommands::Add(args) => run_add(args, global),
    }
}

/// Resolve a `--category` argument given as a name or numeric id
fn resolve_category(store: &CatalogStore, raw: &str) -> Result<(i64, String)> {
    let found = if let Ok(id) = raw.parse::<i64>() {
        store.category_by_id(id)
    } else {
        store.category_by_name(raw)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    found
        .map(|cat| (cat.id, cat.name))
        .ok_or_else(|| miette::miette!("No category named '{}'", raw))
}

fn category_names(store: &CatalogStore) -> Result<HashMap<i64, String>> {
    Ok(store
        .categories()
        .map_err(|e| miette::miette!("{}", e))?
        .into_iter()
        .map(|cat| (cat.id, cat.name))
        .collect())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let mut filter = PartFilter {
        material: args.material,
        part_type: args.part_type,
        vendor: args.vendor,
        search: args.search,
        ..PartFilter::default()
    };
    if let Some(ref raw) = args.category {
        filter.category_id = Some(resolve_category(&store, raw)?.0);
    }

    let mut parts = store
        .list_parts(&filter)
        .map_err(|e| miette::miette!("{}", e))?;
    if let Some(limit) = args.limit {
        parts.truncate(limit);
    }

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    match resolve_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&parts).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&parts).into_diagnostic()?);
        }
        format => {
            let names = category_names(&store)?;
            let rows = parts
                .into_iter()
                .map(|part| {
                    let category = part
                        .category_id
                        .and_then(|id| names.get(&id).cloned())
                        .map(CellValue::Type)
                        .unwrap_or(CellValue::Empty);

                    TableRow::new(part.id.clone())
                        .cell("id", CellValue::Id(part.id))
                        .cell("name", CellValue::Text(part.name))
                        .cell("category", category)
                        .cell("material", opt_cell(part.material))
                        .cell("type", opt_cell(part.part_type))
                        .cell("size", opt_cell(part.size))
                        .cell("vendor", opt_cell(part.vendor))
                })
                .collect();

            let formatter = TableFormatter::new(COLUMNS, "part");
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

fn opt_cell(value: Option<String>) -> CellValue {
    value.map(CellValue::Type).unwrap_or(CellValue::Empty)
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let part = store
        .find_part_by_any_number(&args.id)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("Part '{}' not found", args.id))?;

    match resolve_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&part).into_diagnostic()?);
        }
        _ => {
            // YAML is the full-fidelity default for show
            print!("{}", serde_yml::to_string(&part).into_diagnostic()?);
        }
    }

    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let (category_id, category_name) = resolve_category(&store, &args.category)?;

    let part_number = args.part_number.clone().unwrap_or_else(|| {
        generate_part_number(
            &category_name,
            args.material.as_deref(),
            args.part_type.as_deref(),
            args.size.as_deref(),
        )
    });

    if store
        .find_part_by_any_number(&part_number)
        .map_err(|e| miette::miette!("{}", e))?
        .is_some()
    {
        return Err(miette::miette!("Part '{}' already exists", part_number));
    }

    let mut part = Part::new(&part_number);
    part.name = args.name;
    part.category_id = Some(category_id);
    part.material = args.material;
    part.part_type = args.part_type;
    part.size = args.size;
    part.bearing_type = args.bearing_type;
    part.load_capacity = args.load_capacity;
    part.vendor = args.vendor;
    part.competitor_parts = args.competitor_parts;
    part.compatible_wheels = args.compatible_wheels;
    part.compatible_rigs = args.compatible_rigs;
    part.other_requirements = args.other_requirements;
    part.requires_zerk_axle = args.requires_zerk_axle;
    part.requires_stainless_components = args.requires_stainless;

    store.insert_part(&part).map_err(|e| miette::miette!("{}", e))?;
    store.invalidate_parts_cache();

    println!(
        "{} Created part {} in {} - {}",
        style("✓").green(),
        style(&part.id).cyan(),
        category_name,
        part.name
    );

    Ok(())
}
