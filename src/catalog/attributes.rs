//! Attribute inference from part identifying text
//!
//! All detectors scan the part number concatenated with the part name,
//! uppercased. The keyword tables are ordered and first-match-wins: when a
//! text contains keywords of more than one entry, the earliest entry in the
//! table is returned. Callers depend on that tie-break, so the tables are
//! plain ordered slices, never maps.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered material keyword table
const MATERIAL_PATTERNS: &[(&str, &[&str])] = &[
    ("Steel", &["STL", "STEEL", "-S-", "CARBON"]),
    ("Stainless Steel", &["SST", "SS", "S/S", "STAINLESS"]),
    ("Polyurethane", &["PU", "POLY", "URETHANE"]),
    ("Rubber", &["RBR", "RUBBER", "EPDM"]),
    ("Nylon", &["NYL", "NYLON"]),
    ("Cast Iron", &["CI", "CAST", "IRON"]),
    ("Aluminum", &["ALM", "ALUM", "AL"]),
    ("Zinc", &["ZNC", "ZINC"]),
    ("Plastic", &["PLS", "PLASTIC", "PVC"]),
];

// Type keyword tables, selected by category id
const WHEEL_TYPES: &[(&str, &[&str])] = &[
    ("Standard", &["STD", "STANDARD"]),
    ("Soft Tread", &["SOFT", "SOFTTREAD"]),
    ("High Temp", &["HT", "HIGHTEMP", "TEMP"]),
    ("Heavy Duty", &["HD", "HEAVY"]),
];

const RIG_TYPES: &[(&str, &[&str])] = &[
    ("Swivel", &["SWV", "SWIVEL", "SWIV"]),
    ("Rigid", &["RGD", "RIGID"]),
];

const AXLE_TYPES: &[(&str, &[&str])] = &[
    ("Threaded", &["THR", "THREAD"]),
    ("Smooth", &["SMT", "SMOOTH"]),
    ("Kingpin", &["KP", "KING"]),
    ("Zerk", &["ZRK", "ZERK"]),
];

const BRAKE_TYPES: &[(&str, &[&str])] = &[
    ("Total Lock", &["TL", "TOTAL"]),
    ("Face Contact", &["FC", "FACE"]),
    ("Side Lock", &["SL", "SIDE"]),
];

/// Fallback table for categories without a dedicated type vocabulary
const DEFAULT_TYPES: &[(&str, &[&str])] = &[
    ("Standard", &["STD", "STANDARD"]),
    ("Heavy Duty", &["HD", "HEAVY"]),
    ("Lightweight", &["LW", "LIGHT"]),
];

const BEARING_PATTERNS: &[(&str, &[&str])] = &[
    ("Plain Bore", &["PLAIN", "BORE"]),
    ("Roller", &["ROLLER", "ROLL"]),
    ("Ball Bearing", &["BALL", "BB"]),
    ("Precision", &["PRECISION", "PREC"]),
];

/// Ordered size patterns: inch-with-fraction, inch, diameter, millimeter,
/// then a bare number with an optional `x` second dimension. The first
/// pattern to match wins; the extracted number is not sanity-checked.
static SIZE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+(?:-\d+/\d+|/\d+)?(?:\s*x\s*\d+(?:-\d+/\d+|/\d+)?)?)[\s-]INCH",
        r"(?i)(\d+(?:/\d+)?(?:\s*X\s*\d+(?:/\d+)?)?)[\s-]IN",
        r"(?i)(\d+(?:\.\d+)?(?:/\d+)?)[\s-]?DIA",
        r"(?i)(\d+(?:\.\d+)?(?:/\d+)?)[\s-]?MM",
        r"\b(\d+(?:\.\d+)?(?:/\d+)?(?:\s*[Xx]\s*\d+(?:\.\d+)?(?:/\d+)?)?)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("size pattern"))
    .collect()
});

fn first_keyword_match(table: &[(&'static str, &[&str])], text: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(name, _)| *name)
}

/// Infer a material name from identifying text, or `None` if no keyword hits
pub fn detect_material(text: &str) -> Option<&'static str> {
    first_keyword_match(MATERIAL_PATTERNS, &text.to_uppercase())
}

/// Infer a part type using the category's keyword table.
///
/// Categories without their own table fall back to the generic
/// Standard / Heavy Duty / Lightweight vocabulary.
pub fn detect_type(category_id: i64, text: &str) -> Option<&'static str> {
    let table = match category_id {
        1 => WHEEL_TYPES,
        2 => RIG_TYPES,
        3 => AXLE_TYPES,
        5 => BRAKE_TYPES,
        _ => DEFAULT_TYPES,
    };
    first_keyword_match(table, &text.to_uppercase())
}

/// Infer a bearing type. Only meaningful for parts in the Wheels category;
/// the caller is responsible for restricting it there.
pub fn detect_bearing_type(text: &str) -> Option<&'static str> {
    first_keyword_match(BEARING_PATTERNS, &text.to_uppercase())
}

/// Extract a size string like `4-inch`, `1/2-inch`, `40-mm` or
/// `2-inch diameter` from identifying text
pub fn detect_size(text: &str) -> Option<String> {
    let text = text.to_uppercase();

    for pattern in SIZE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let value = caps.get(1)?.as_str();
            let matched = caps.get(0)?.as_str();
            return Some(if matched.contains("MM") {
                format!("{}-mm", value)
            } else if matched.contains("INCH") || matched.contains("-IN") {
                format!("{}-inch", value)
            } else if matched.contains("DIA") {
                format!("{}-inch diameter", value)
            } else {
                format!("{}-inch", value)
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_material_polyurethane() {
        // "PUR" hits the PU keyword before any other table entry
        assert_eq!(detect_material("WHL-PUR-STA40-1234"), Some("Polyurethane"));
    }

    #[test]
    fn test_detect_material_is_case_insensitive() {
        assert_eq!(detect_material("whl-rbr-sta50"), Some("Rubber"));
    }

    #[test]
    fn test_detect_material_order_is_the_tie_break() {
        // Contains both SST (Stainless Steel) and STL (Steel); Steel is
        // earlier in the table, so Steel wins.
        assert_eq!(detect_material("SST STL"), Some("Steel"));
        // SST alone resolves to Stainless Steel (no Steel keyword present)
        assert_eq!(detect_material("AXL-SST-2345"), Some("Stainless Steel"));
    }

    #[test]
    fn test_detect_material_none() {
        assert_eq!(detect_material("QQQ-000"), None);
    }

    #[test]
    fn test_detect_type_uses_category_table() {
        assert_eq!(detect_type(2, "RIG-STL-SWI30-9012"), Some("Swivel"));
        assert_eq!(detect_type(3, "AXL-SST-ZER40-2345"), Some("Zerk"));
        assert_eq!(detect_type(1, "WHL SOFT TREAD"), Some("Soft Tread"));
        assert_eq!(detect_type(5, "BRK-TL-100"), Some("Total Lock"));
    }

    #[test]
    fn test_detect_type_falls_back_to_default_table() {
        // Category 7 has no dedicated table; HD hits Heavy Duty in the
        // generic one
        assert_eq!(detect_type(7, "THG-HD-200"), Some("Heavy Duty"));
        assert_eq!(detect_type(9, "BRG-LW-10"), Some("Lightweight"));
    }

    #[test]
    fn test_detect_bearing_type() {
        assert_eq!(detect_bearing_type("WHL PLAIN BORE 4"), Some("Plain Bore"));
        assert_eq!(detect_bearing_type("WHL-ROLLER-5"), Some("Roller"));
        assert_eq!(detect_bearing_type("precision wheel"), Some("Precision"));
        assert_eq!(detect_bearing_type("WHL-STD-4"), None);
    }

    #[test]
    fn test_detect_size_fraction_inch() {
        let size = detect_size("AXL-SST-1/2-INCH-2345").unwrap();
        assert!(size.contains("1/2"));
        assert!(size.ends_with("-inch"));
    }

    #[test]
    fn test_detect_size_inch_word() {
        assert_eq!(detect_size("WHEEL 5 INCH SOFT"), Some("5-inch".to_string()));
    }

    #[test]
    fn test_detect_size_millimeter() {
        assert_eq!(detect_size("WHL 100MM HD"), Some("100-mm".to_string()));
    }

    #[test]
    fn test_detect_size_diameter() {
        assert_eq!(
            detect_size("HUB 2-DIA SMOOTH"),
            Some("2-inch diameter".to_string())
        );
    }

    #[test]
    fn test_detect_size_bare_number_defaults_to_inch() {
        assert_eq!(detect_size("CASTER 4X2 GRAY"), Some("4X2-inch".to_string()));
    }

    #[test]
    fn test_detect_size_none() {
        assert_eq!(detect_size("NO-DIGITS-HERE"), None);
    }
}
