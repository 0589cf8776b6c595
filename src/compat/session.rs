//! Compatibility session - selections and rule evaluation
//!
//! A session owns the rule set and at most one selected part per category.
//! Every selection change re-evaluates the full rule set; with tens of
//! rules and selections this is cheap, and it keeps the warning list a pure
//! function of the current state.

use std::collections::BTreeMap;

use crate::catalog::Part;
use crate::compat::rule::{builtin_rules, CompatibilityRule};

/// Session-scoped selection state and rule evaluation
pub struct CompatSession {
    rules: Vec<CompatibilityRule>,
    selections: BTreeMap<String, Part>,
    warnings: Vec<String>,
}

impl CompatSession {
    /// Create a session over a loaded rule set
    pub fn new(rules: Vec<CompatibilityRule>) -> Self {
        Self {
            rules,
            selections: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a session over the built-in fallback rules
    pub fn with_builtin_rules() -> Self {
        Self::new(builtin_rules())
    }

    pub fn rules(&self) -> &[CompatibilityRule] {
        &self.rules
    }

    /// Select (or replace) the part for a category, then re-evaluate.
    /// Returns the current violation messages.
    pub fn select_part(&mut self, category_name: &str, part: Part) -> &[String] {
        self.selections.insert(category_name.to_string(), part);
        self.evaluate()
    }

    /// Evaluate every rule against the current selections.
    ///
    /// A rule is skipped when its condition category has no selection, or
    /// when it is armed but the target category has no selection yet. All
    /// rules are always evaluated; violations are reported in rule order.
    pub fn evaluate(&mut self) -> &[String] {
        let mut warnings = Vec::new();

        for rule in &self.rules {
            let Some(condition_part) = self.selections.get(&rule.condition_category) else {
                continue;
            };
            if condition_part.attribute(&rule.condition_attribute)
                != Some(rule.condition_value.as_str())
            {
                continue;
            }

            let Some(target_part) = self.selections.get(&rule.target_category) else {
                continue;
            };
            if target_part.attribute(&rule.target_attribute) != Some(rule.target_value.as_str()) {
                warnings.push(rule.error_message.clone());
            }
        }

        self.warnings = warnings;
        &self.warnings
    }

    /// Violation messages from the last evaluation
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The currently selected part for a category, if any
    pub fn selection(&self, category_name: &str) -> Option<&Part> {
        self.selections.get(category_name)
    }

    /// All current selections with their category names
    pub fn selected_parts(&self) -> Vec<(&str, &Part)> {
        self.selections
            .iter()
            .map(|(category, part)| (category.as_str(), part))
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selections.is_empty()
    }

    /// Drop all selections and warnings
    pub fn clear_selection(&mut self) {
        self.selections.clear();
        self.warnings.clear();
    }
}
