//! Compatibility rule definitions
//!
//! Rules are declarative data: when the part selected for the condition
//! category carries the condition attribute value, the part selected for
//! the target category must carry the target attribute value. New
//! constraints are added as rows in the store, not as code.

use serde::{Deserialize, Serialize};

/// A single declarative compatibility constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Category name whose selection arms the rule
    pub condition_category: String,
    pub condition_attribute: String,
    pub condition_value: String,

    /// Category name the armed rule constrains
    pub target_category: String,
    pub target_attribute: String,
    pub target_value: String,

    /// Message reported when the rule is violated
    pub error_message: String,
}

/// Built-in fallback rule set, used when rule definitions cannot be loaded
/// from the store so compatibility checking stays partially usable.
pub fn builtin_rules() -> Vec<CompatibilityRule> {
    vec![
        CompatibilityRule {
            id: 1,
            name: "Stainless Steel Rule".to_string(),
            description: "Stainless Steel rigs require Stainless Steel axles".to_string(),
            condition_category: "Rigs".to_string(),
            condition_attribute: "material".to_string(),
            condition_value: "Stainless Steel".to_string(),
            target_category: "Axles".to_string(),
            target_attribute: "material".to_string(),
            target_value: "Stainless Steel".to_string(),
            error_message: "Stainless Steel rigs require Stainless Steel axles.".to_string(),
        },
        CompatibilityRule {
            id: 2,
            name: "Roller Bearing Rule".to_string(),
            description: "Wheels with roller bearings require Zerk axles".to_string(),
            condition_category: "Wheels".to_string(),
            condition_attribute: "bearing_type".to_string(),
            condition_value: "Roller".to_string(),
            target_category: "Axles".to_string(),
            target_attribute: "type".to_string(),
            target_value: "Zerk".to_string(),
            error_message: "Wheels with roller bearings require Zerk axles.".to_string(),
        },
    ]
}
