//! Bulk import of parts usage data
//!
//! The pipeline consumes already-parsed tabular rows (string-keyed field
//! maps) and reconciles them against existing part records. Each row is an
//! independent unit of work: failures are counted and the loop moves on,
//! so a mid-batch error never rolls back earlier rows.

pub mod extract;

use std::collections::HashMap;

use console::style;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{categorize, Part};
use crate::core::{CatalogStore, StoreError};

/// Verbatim spreadsheet header keys. The usage headers carry the embedded
/// carriage-return/newline sequences of the source export; they are lookup
/// keys and must not be normalized.
pub const VENDOR_KEY: &str = "Primary Vendor";
pub const PART_NUMBER_KEY: &str = "Part Number";
pub const TOTAL_USAGE_KEY: &str = "Total Rolling\r\r\n 12 Months";
pub const MONTHLY_USAGE_KEY: &str = "Average Monthly\r\r\n Usage Rolling12";

/// One parsed spreadsheet row
pub type ImportRow = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("row is missing a part number")]
    MissingPartNumber,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Aggregate result of an import batch
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Aggregate result of a categorization pass
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizationStats {
    pub total: usize,
    pub categorized: usize,
    pub skipped: usize,
}

fn field<'a>(row: &'a ImportRow, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

/// Parse a usage cell. Missing and empty cells default to 0; thousands
/// separators are stripped; anything else non-numeric stores as absent.
fn parse_usage(raw: &str) -> Option<f64> {
    let raw = if raw.is_empty() { "0" } else { raw };
    raw.replace(',', "").trim().parse::<f64>().ok()
}

enum RowOutcome {
    Created,
    Updated,
}

/// Import a batch of rows, returning aggregate statistics.
///
/// A leading row whose vendor cell literally repeats the header label is a
/// duplicated header and is skipped before counting. After the batch the
/// store's per-category part cache is invalidated so subsequent reads are
/// fresh.
pub fn import_rows(store: &mut CatalogStore, rows: &[ImportRow]) -> ImportStats {
    let mut rows = rows;
    let mut row_offset = 2;
    if rows
        .first()
        .map(|row| field(row, VENDOR_KEY) == VENDOR_KEY)
        .unwrap_or(false)
    {
        rows = &rows[1..];
        row_offset += 1;
    }

    let mut stats = ImportStats::default();

    for (idx, row) in rows.iter().enumerate() {
        stats.total += 1;
        match import_row(store, row) {
            Ok(RowOutcome::Created) => stats.created += 1,
            Ok(RowOutcome::Updated) => stats.updated += 1,
            Err(err) => {
                eprintln!(
                    "{} Row {}: {}",
                    style("✗").red(),
                    idx + row_offset,
                    err
                );
                stats.errors += 1;
            }
        }
    }

    store.invalidate_parts_cache();
    stats
}

fn import_row(store: &CatalogStore, row: &ImportRow) -> Result<RowOutcome, ImportError> {
    let vendor = field(row, VENDOR_KEY);
    let part_number = field(row, PART_NUMBER_KEY);
    if part_number.is_empty() {
        return Err(ImportError::MissingPartNumber);
    }
    let vendor = (!vendor.is_empty()).then_some(vendor);

    let rolling = parse_usage(field(row, TOTAL_USAGE_KEY));
    let monthly = parse_usage(field(row, MONTHLY_USAGE_KEY));

    if let Some(existing) = store.find_part_by_any_number(part_number)? {
        store.update_usage(&existing.id, vendor, rolling, monthly)?;
        return Ok(RowOutcome::Updated);
    }

    // New part: the number doubles as id and placeholder name, and the
    // prefix rules take a first shot at the category (possibly none)
    let mut part = Part::new(part_number);
    part.category_id = categorize(part_number).map(|m| m.category_id);
    part.vendor = vendor.map(String::from);
    part.rolling_12_month_usage = rolling;
    part.avg_monthly_usage = monthly;
    store.insert_part(&part)?;
    Ok(RowOutcome::Created)
}

/// Assign categories to every part that has none, using the prefix rules.
/// Parts no rule matches are counted as skipped and left uncategorized.
pub fn categorize_uncategorized(
    store: &mut CatalogStore,
) -> Result<CategorizationStats, StoreError> {
    let parts = store.uncategorized_parts()?;
    let mut stats = CategorizationStats {
        total: parts.len(),
        ..CategorizationStats::default()
    };

    for part in &parts {
        let number = if part.part_number.is_empty() {
            &part.id
        } else {
            &part.part_number
        };

        match categorize(number) {
            Some(m) => match store.set_part_category(&part.id, m.category_id) {
                Ok(()) => stats.categorized += 1,
                Err(err) => {
                    eprintln!("{} {}: {}", style("✗").red(), part.id, err);
                    stats.skipped += 1;
                }
            },
            None => stats.skipped += 1,
        }
    }

    store.invalidate_parts_cache();
    Ok(stats)
}
