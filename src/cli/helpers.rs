//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::compat::{builtin_rules, CompatibilityRule};
use crate::core::{CatalogStore, Config};

/// Open the catalog store, resolving the path from the global `--db`
/// option, the environment, or the layered config
pub fn open_store(global: &GlobalOpts) -> Result<CatalogStore> {
    let path = global
        .db
        .clone()
        .unwrap_or_else(|| Config::load().database_path());
    CatalogStore::open(&path).map_err(|e| miette::miette!("{}", e))
}

/// Resolve the effective output format: an explicit `--format` wins,
/// otherwise the configured default, otherwise auto
pub fn resolve_format(global: &GlobalOpts) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    match Config::load().default_format.as_deref() {
        Some("yaml") => OutputFormat::Yaml,
        Some("json") => OutputFormat::Json,
        Some("tsv") => OutputFormat::Tsv,
        Some("csv") => OutputFormat::Csv,
        Some("md") => OutputFormat::Md,
        Some("id") => OutputFormat::Id,
        _ => OutputFormat::Auto,
    }
}

/// Load the compatibility rules, falling back to the built-in set when the
/// store can't provide them so checking stays usable
pub fn load_rules(store: &CatalogStore) -> Vec<CompatibilityRule> {
    match store.compatibility_rules() {
        Ok(rules) => rules,
        Err(err) => {
            eprintln!(
                "{} Could not load compatibility rules ({}); using the built-in set",
                style("!").yellow(),
                err
            );
            builtin_rules()
        }
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
