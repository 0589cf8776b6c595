//! Prefix-based part categorization
//!
//! Unlike the attribute detectors, categorization tests prefixes, not
//! substrings: the uppercased part number must start with one of a rule's
//! prefixes. Rules are tried in declared order and the first hit wins;
//! some prefixes are substrings of others, so the order is part of the
//! contract.

/// A resolved category assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category_id: i64,
    pub category_name: &'static str,
}

/// Ordered prefix rules, including the rig brand prefixes
const CATEGORY_RULES: &[(&[&str], i64, &str)] = &[
    (&["WHL", "WHEEL"], 1, "Wheels"),
    (
        &[
            "RIG", "SWIVEL", "CCAPEX", "CCALPHA", "CCCREST", "CCPEAK", "CCSTOUTHD",
        ],
        2,
        "Rigs",
    ),
    (&["AXL", "AXLE", "HUB"], 3, "Axles"),
    (&["TPH", "TOP"], 4, "Top Hats"),
    (&["BRK", "BRAKE"], 5, "Brakes"),
    (&["LOCK", "SWL"], 6, "Swivel Locks"),
    (&["THG", "THREAD"], 7, "Thread Guards"),
    (&["TOE", "TOG"], 8, "Toe Guards"),
    (&["BRG", "BRUSH"], 9, "Brush Guards"),
];

/// Assign a category from the part number's prefix, or `None` if no rule's
/// prefixes match (the part stays uncategorized)
pub fn categorize(part_number: &str) -> Option<CategoryMatch> {
    let upper = part_number.to_uppercase();

    for (prefixes, category_id, category_name) in CATEGORY_RULES {
        if prefixes.iter().any(|prefix| upper.starts_with(prefix)) {
            return Some(CategoryMatch {
                category_id: *category_id,
                category_name: *category_name,
            });
        }
    }

    None
}
