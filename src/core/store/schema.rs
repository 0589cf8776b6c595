//! Database schema initialization

use rusqlite::OptionalExtension;

use super::{CatalogStore, StoreError, SCHEMA_VERSION};

impl CatalogStore {
    /// Initialize the database schema (idempotent)
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn().execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Immutable reference data, created at init
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT ''
            );

            -- Catalog parts; id is the manufacturer part number
            CREATE TABLE IF NOT EXISTS parts (
                id TEXT PRIMARY KEY,
                part_number TEXT NOT NULL,
                internal_part_number TEXT NOT NULL,
                name TEXT NOT NULL,
                category_id INTEGER,
                material TEXT,
                type TEXT,
                size TEXT,
                bearing_type TEXT,
                load_capacity TEXT,
                vendor TEXT,
                competitor_parts TEXT NOT NULL DEFAULT '',
                compatible_wheels TEXT NOT NULL DEFAULT '',
                compatible_rigs TEXT NOT NULL DEFAULT '',
                requires_zerk_axle INTEGER NOT NULL DEFAULT 0,
                requires_stainless_components INTEGER NOT NULL DEFAULT 0,
                other_requirements TEXT,
                image_url TEXT,
                rolling_12_month_usage REAL,
                avg_monthly_usage REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories(id)
            );
            CREATE INDEX IF NOT EXISTS idx_parts_category ON parts(category_id);
            CREATE INDEX IF NOT EXISTS idx_parts_number ON parts(part_number);
            CREATE INDEX IF NOT EXISTS idx_parts_internal ON parts(internal_part_number);
            CREATE INDEX IF NOT EXISTS idx_parts_vendor ON parts(vendor);
            CREATE INDEX IF NOT EXISTS idx_parts_material ON parts(material);

            -- Declarative compatibility constraints
            CREATE TABLE IF NOT EXISTS compatibility_rules (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                condition_category_id INTEGER NOT NULL,
                condition_attribute TEXT NOT NULL,
                condition_value TEXT NOT NULL,
                target_category_id INTEGER NOT NULL,
                target_attribute TEXT NOT NULL,
                target_value TEXT NOT NULL,
                error_message TEXT NOT NULL,
                FOREIGN KEY (condition_category_id) REFERENCES categories(id),
                FOREIGN KEY (target_category_id) REFERENCES categories(id)
            );
            "#,
        )?;

        self.conn().execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Refuse databases written by a different schema version
    pub(super) fn check_schema_version(&self) -> Result<(), StoreError> {
        let found: Option<i32> = self
            .conn()
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match found {
            Some(v) if v != SCHEMA_VERSION => Err(StoreError::SchemaVersion {
                found: v,
                expected: SCHEMA_VERSION,
            }),
            _ => Ok(()),
        }
    }
}
