//! Internal part number generation
//!
//! Numbers follow the `CAT-MAT-TYPSZ-NNNN` shape seen across the catalog:
//! category and material abbreviations, the first three letters of the
//! type, the digits of the size, and a four-digit suffix taken from the
//! clock so repeated generations stay distinct.

use chrono::Utc;

const CATEGORY_CODES: &[(&str, &str)] = &[
    ("Wheels", "WHL"),
    ("Rigs", "RIG"),
    ("Axles", "AXL"),
    ("Top Hats", "TPH"),
    ("Brakes", "BRK"),
    ("Swivel Locks", "SLK"),
    ("Thread Guards", "THG"),
    ("Toe Guards", "TOG"),
    ("Brush Guards", "BRG"),
];

const MATERIAL_CODES: &[(&str, &str)] = &[
    ("Steel", "STL"),
    ("Stainless Steel", "SST"),
    ("Polyurethane", "PUR"),
    ("Rubber", "RBR"),
    ("Nylon", "NYL"),
    ("Cast Iron", "CIR"),
    ("Aluminum", "ALM"),
    ("Zinc", "ZNC"),
    ("Plastic", "PLS"),
];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> &'static str {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| *code)
        .unwrap_or("XXX")
}

/// Generate an internal part number from a part's category and attributes.
///
/// Unknown categories and materials map to `XXX`; an absent type is `XXX`
/// and an absent size is `00`.
pub fn generate_part_number(
    category: &str,
    material: Option<&str>,
    part_type: Option<&str>,
    size: Option<&str>,
) -> String {
    let category_code = lookup(CATEGORY_CODES, category);
    let material_code = material.map_or("XXX", |m| lookup(MATERIAL_CODES, m));

    let type_code = match part_type.filter(|t| !t.is_empty()) {
        Some(t) => t.chars().take(3).collect::<String>().to_uppercase(),
        None => "XXX".to_string(),
    };

    let size_code = match size.filter(|s| !s.is_empty()) {
        Some(s) => s.chars().filter(|c| c.is_ascii_digit()).collect(),
        None => "00".to_string(),
    };

    // Last four digits of the millisecond clock
    let millis = Utc::now().timestamp_millis().to_string();
    let stamp = &millis[millis.len().saturating_sub(4)..];

    format!("{}-{}-{}{}-{}", category_code, material_code, type_code, size_code, stamp)
}
