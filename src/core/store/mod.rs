//! SQLite-backed catalog store
//!
//! The store owns all persistent data: categories, parts, and
//! compatibility rules. Reads are equality-filtered; part lookups for
//! import deduplication OR across the three identifier columns. Per-category
//! part listings are cached in memory until `invalidate_parts_cache` is
//! called - bulk import does this once at the end of a batch so subsequent
//! reads are fresh.

mod queries;
mod schema;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use thiserror::Error;

use crate::catalog::{default_categories, Part};

/// Current schema version - opening a database written by a different
/// version is refused rather than migrated
const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("no category named '{0}'")]
    UnknownCategory(String),

    #[error("part '{0}' not found")]
    PartNotFound(String),
}

/// Equality filters for part listings
#[derive(Debug, Default, Clone)]
pub struct PartFilter {
    pub category_id: Option<i64>,
    pub material: Option<String>,
    pub part_type: Option<String>,
    pub vendor: Option<String>,
    /// Substring match on id, part number, and name
    pub search: Option<String>,
}

/// The catalog store backed by SQLite
pub struct CatalogStore {
    conn: Connection,
    parts_cache: HashMap<i64, Vec<Part>>,
}

impl CatalogStore {
    /// Open (creating if needed) the catalog database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL keeps readers unblocked while the import loop writes
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let store = Self {
            conn,
            parts_cache: HashMap::new(),
        };

        store.init_schema()?;
        store.check_schema_version()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let store = Self {
            conn,
            parts_cache: HashMap::new(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open and seed the reference data (categories, built-in rules)
    pub fn initialize(path: &Path) -> Result<Self, StoreError> {
        let store = Self::open(path)?;
        store.seed()?;
        Ok(store)
    }

    /// Seed categories and the built-in compatibility rules.
    /// Idempotent: existing rows are left untouched.
    pub fn seed(&self) -> Result<(), StoreError> {
        for category in default_categories() {
            self.conn.execute(
                "INSERT OR IGNORE INTO categories (id, name, description) VALUES (?1, ?2, ?3)",
                rusqlite::params![category.id, category.name, category.description],
            )?;
        }

        for rule in crate::compat::builtin_rules() {
            let condition_id = self
                .category_id_by_name(&rule.condition_category)?
                .ok_or_else(|| StoreError::UnknownCategory(rule.condition_category.clone()))?;
            let target_id = self
                .category_id_by_name(&rule.target_category)?
                .ok_or_else(|| StoreError::UnknownCategory(rule.target_category.clone()))?;

            self.conn.execute(
                r#"INSERT OR IGNORE INTO compatibility_rules
                   (id, name, description,
                    condition_category_id, condition_attribute, condition_value,
                    target_category_id, target_attribute, target_value,
                    error_message)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
                rusqlite::params![
                    rule.id,
                    rule.name,
                    rule.description,
                    condition_id,
                    rule.condition_attribute,
                    rule.condition_value,
                    target_id,
                    rule.target_attribute,
                    rule.target_value,
                    rule.error_message,
                ],
            )?;
        }

        Ok(())
    }

    /// Drop every cached per-category part listing so the next read hits
    /// the database
    pub fn invalidate_parts_cache(&mut self) {
        self.parts_cache.clear();
    }

    pub(super) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Join a string sequence for single-column storage
pub(super) fn join_list(values: &[String]) -> String {
    values.join(",")
}

/// Split a stored string sequence, dropping empties
pub(super) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a stored RFC 3339 timestamp, falling back to the epoch sentinel
pub(super) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())
}
