//! Attribute extraction pass
//!
//! Enriches categorized parts whose material is still unset by running the
//! pattern detectors over their identifying text. Each invocation handles
//! at most [`EXTRACTION_BATCH_LIMIT`] parts to bound latency against the
//! store; callers re-invoke until no candidates remain. Re-running is safe:
//! only detected attributes are written, nothing is ever un-set, and parts
//! that gain a material drop out of the candidate filter.

use console::style;
use serde::Serialize;

use crate::catalog::{
    detect_bearing_type, detect_material, detect_size, detect_type, WHEELS_CATEGORY_ID,
};
use crate::core::{CatalogStore, StoreError};

/// Maximum candidates per invocation
pub const EXTRACTION_BATCH_LIMIT: usize = 100;

/// Aggregate result of one extraction pass
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub total: usize,
    pub updated: usize,
    pub with_material: usize,
    pub with_type: usize,
    pub with_size: usize,
}

/// Run one extraction pass over up to [`EXTRACTION_BATCH_LIMIT`] candidates.
///
/// Parts with no detectable attributes are left untouched and not counted
/// as updated. Only the candidate fetch itself is a hard failure; per-part
/// update errors are reported and the pass continues.
pub fn run_extraction_pass(store: &mut CatalogStore) -> Result<ExtractionStats, StoreError> {
    let candidates = store.extraction_candidates(EXTRACTION_BATCH_LIMIT)?;
    let mut stats = ExtractionStats {
        total: candidates.len(),
        ..ExtractionStats::default()
    };

    for part in &candidates {
        let text = part.search_text();

        let material = detect_material(&text);
        let part_type = part.category_id.and_then(|id| detect_type(id, &text));
        let size = detect_size(&text);
        let bearing_type = if part.category_id == Some(WHEELS_CATEGORY_ID) {
            detect_bearing_type(&text)
        } else {
            None
        };

        if material.is_none() && part_type.is_none() && size.is_none() && bearing_type.is_none() {
            continue;
        }

        if material.is_some() {
            stats.with_material += 1;
        }
        if part_type.is_some() {
            stats.with_type += 1;
        }
        if size.is_some() {
            stats.with_size += 1;
        }

        match store.update_part_attributes(
            &part.id,
            material,
            part_type,
            size.as_deref(),
            bearing_type,
        ) {
            Ok(()) => stats.updated += 1,
            Err(err) => eprintln!("{} {}: {}", style("✗").red(), part.id, err),
        }
    }

    Ok(stats)
}
