//! Query methods for categories, parts, and compatibility rules

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::{join_list, parse_datetime, split_list, CatalogStore, PartFilter, StoreError};
use crate::catalog::{Category, Part};
use crate::compat::CompatibilityRule;

/// Column list matching `part_from_row`
const PART_COLUMNS: &str = "id, part_number, internal_part_number, name, category_id, \
     material, type, size, bearing_type, load_capacity, vendor, \
     competitor_parts, compatible_wheels, compatible_rigs, \
     requires_zerk_axle, requires_stainless_components, \
     other_requirements, image_url, rolling_12_month_usage, avg_monthly_usage, \
     created_at, updated_at";

fn part_from_row(row: &Row) -> rusqlite::Result<Part> {
    Ok(Part {
        id: row.get(0)?,
        part_number: row.get(1)?,
        internal_part_number: row.get(2)?,
        name: row.get(3)?,
        category_id: row.get(4)?,
        material: row.get(5)?,
        part_type: row.get(6)?,
        size: row.get(7)?,
        bearing_type: row.get(8)?,
        load_capacity: row.get(9)?,
        vendor: row.get(10)?,
        competitor_parts: split_list(&row.get::<_, String>(11)?),
        compatible_wheels: split_list(&row.get::<_, String>(12)?),
        compatible_rigs: split_list(&row.get::<_, String>(13)?),
        requires_zerk_axle: row.get::<_, i64>(14)? != 0,
        requires_stainless_components: row.get::<_, i64>(15)? != 0,
        other_requirements: row.get(16)?,
        image_url: row.get(17)?,
        rolling_12_month_usage: row.get(18)?,
        avg_monthly_usage: row.get(19)?,
        created_at: parse_datetime(&row.get::<_, String>(20)?),
        updated_at: parse_datetime(&row.get::<_, String>(21)?),
    })
}

impl CatalogStore {
    /// All categories, ordered by name
    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, description FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn category_by_id(&self, id: i64) -> Result<Option<Category>, StoreError> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name, description FROM categories WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn category_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name, description FROM categories WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    pub(super) fn category_id_by_name(&self, name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id FROM categories WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Parts in a category, served from the in-memory cache when warm
    pub fn parts_for_category(&mut self, category_id: i64) -> Result<Vec<Part>, StoreError> {
        if let Some(parts) = self.parts_cache.get(&category_id) {
            return Ok(parts.clone());
        }

        let parts = self.list_parts(&PartFilter {
            category_id: Some(category_id),
            ..PartFilter::default()
        })?;
        self.parts_cache.insert(category_id, parts.clone());
        Ok(parts)
    }

    /// List parts matching the filter's equality predicates, ordered by id
    pub fn list_parts(&self, filter: &PartFilter) -> Result<Vec<Part>, StoreError> {
        let mut sql = format!("SELECT {} FROM parts WHERE 1=1", PART_COLUMNS);
        let pattern;
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(ref category_id) = filter.category_id {
            sql.push_str(" AND category_id = ?");
            values.push(category_id);
        }
        if let Some(ref material) = filter.material {
            sql.push_str(" AND material = ?");
            values.push(material);
        }
        if let Some(ref part_type) = filter.part_type {
            sql.push_str(" AND type = ?");
            values.push(part_type);
        }
        if let Some(ref vendor) = filter.vendor {
            sql.push_str(" AND vendor = ?");
            values.push(vendor);
        }
        if let Some(ref search) = filter.search {
            pattern = format!("%{}%", search);
            sql.push_str(" AND (id LIKE ? OR name LIKE ? OR part_number LIKE ?)");
            values.push(&pattern);
            values.push(&pattern);
            values.push(&pattern);
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(&values[..], part_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_part(&self, id: &str) -> Result<Option<Part>, StoreError> {
        let sql = format!("SELECT {} FROM parts WHERE id = ?1", PART_COLUMNS);
        Ok(self
            .conn()
            .query_row(&sql, params![id], part_from_row)
            .optional()?)
    }

    /// Deduplication lookup: OR across the three identifier columns,
    /// limited to one match
    pub fn find_part_by_any_number(&self, number: &str) -> Result<Option<Part>, StoreError> {
        let sql = format!(
            "SELECT {} FROM parts \
             WHERE id = ?1 OR part_number = ?1 OR internal_part_number = ?1 \
             LIMIT 1",
            PART_COLUMNS
        );
        Ok(self
            .conn()
            .query_row(&sql, params![number], part_from_row)
            .optional()?)
    }

    pub fn insert_part(&self, part: &Part) -> Result<(), StoreError> {
        self.conn().execute(
            r#"INSERT INTO parts
               (id, part_number, internal_part_number, name, category_id,
                material, type, size, bearing_type, load_capacity, vendor,
                competitor_parts, compatible_wheels, compatible_rigs,
                requires_zerk_axle, requires_stainless_components,
                other_requirements, image_url,
                rolling_12_month_usage, avg_monthly_usage,
                created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                       ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)"#,
            params![
                part.id,
                part.part_number,
                part.internal_part_number,
                part.name,
                part.category_id,
                part.material,
                part.part_type,
                part.size,
                part.bearing_type,
                part.load_capacity,
                part.vendor,
                join_list(&part.competitor_parts),
                join_list(&part.compatible_wheels),
                join_list(&part.compatible_rigs),
                part.requires_zerk_axle as i64,
                part.requires_stainless_components as i64,
                part.other_requirements,
                part.image_url,
                part.rolling_12_month_usage,
                part.avg_monthly_usage,
                part.created_at.to_rfc3339(),
                part.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Refresh an existing part's vendor and usage figures
    pub fn update_usage(
        &self,
        id: &str,
        vendor: Option<&str>,
        rolling_12_month_usage: Option<f64>,
        avg_monthly_usage: Option<f64>,
    ) -> Result<(), StoreError> {
        let changed = self.conn().execute(
            "UPDATE parts SET vendor = ?1, rolling_12_month_usage = ?2, \
             avg_monthly_usage = ?3, updated_at = ?4 WHERE id = ?5",
            params![
                vendor,
                rolling_12_month_usage,
                avg_monthly_usage,
                Utc::now().to_rfc3339(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::PartNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Partial attribute update: only the provided fields are written,
    /// absent ones keep their stored value
    pub fn update_part_attributes(
        &self,
        id: &str,
        material: Option<&str>,
        part_type: Option<&str>,
        size: Option<&str>,
        bearing_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let changed = self.conn().execute(
            "UPDATE parts SET \
             material = COALESCE(?1, material), \
             type = COALESCE(?2, type), \
             size = COALESCE(?3, size), \
             bearing_type = COALESCE(?4, bearing_type), \
             updated_at = ?5 \
             WHERE id = ?6",
            params![material, part_type, size, bearing_type, Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::PartNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn set_part_category(&self, id: &str, category_id: i64) -> Result<(), StoreError> {
        let changed = self.conn().execute(
            "UPDATE parts SET category_id = ?1, updated_at = ?2 WHERE id = ?3",
            params![category_id, Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::PartNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Parts that have not been assigned a category yet
    pub fn uncategorized_parts(&self) -> Result<Vec<Part>, StoreError> {
        let sql = format!(
            "SELECT {} FROM parts WHERE category_id IS NULL ORDER BY id",
            PART_COLUMNS
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map([], part_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Parts awaiting attribute extraction: categorized, material unset.
    /// The limit bounds one pass; re-running converges because extracted
    /// parts drop out of the filter.
    pub fn extraction_candidates(&self, limit: usize) -> Result<Vec<Part>, StoreError> {
        let sql = format!(
            "SELECT {} FROM parts \
             WHERE category_id IS NOT NULL AND material IS NULL \
             ORDER BY id LIMIT ?1",
            PART_COLUMNS
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64], part_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Load compatibility rules with category names resolved, in id order
    pub fn compatibility_rules(&self) -> Result<Vec<CompatibilityRule>, StoreError> {
        let mut stmt = self.conn().prepare(
            r#"SELECT r.id, r.name, r.description,
                      cc.name, r.condition_attribute, r.condition_value,
                      tc.name, r.target_attribute, r.target_value,
                      r.error_message
               FROM compatibility_rules r
               JOIN categories cc ON cc.id = r.condition_category_id
               JOIN categories tc ON tc.id = r.target_category_id
               ORDER BY r.id"#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CompatibilityRule {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                condition_category: row.get(3)?,
                condition_attribute: row.get(4)?,
                condition_value: row.get(5)?,
                target_category: row.get(6)?,
                target_attribute: row.get(7)?,
                target_value: row.get(8)?,
                error_message: row.get(9)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count_parts(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn()
            .query_row("SELECT COUNT(*) FROM parts", [], |row| row.get(0))?)
    }

    pub fn count_parts_in_category(&self, category_id: i64) -> Result<i64, StoreError> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM parts WHERE category_id = ?1",
            params![category_id],
            |row| row.get(0),
        )?)
    }

    pub fn count_uncategorized(&self) -> Result<i64, StoreError> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM parts WHERE category_id IS NULL",
            [],
            |row| row.get(0),
        )?)
    }

    pub fn count_extraction_candidates(&self) -> Result<i64, StoreError> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM parts WHERE category_id IS NOT NULL AND material IS NULL",
            [],
            |row| row.get(0),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> CatalogStore {
        let store = CatalogStore::open_in_memory().unwrap();
        store.seed().unwrap();
        store
    }

    #[test]
    fn test_insert_and_get_part() {
        let store = seeded_store();
        let mut part = Part::new("WHL-PUR-STA40-1234");
        part.category_id = Some(1);
        part.material = Some("Polyurethane".to_string());
        part.competitor_parts = vec!["ABC-123".to_string()];
        store.insert_part(&part).unwrap();

        let loaded = store.get_part("WHL-PUR-STA40-1234").unwrap().unwrap();
        assert_eq!(loaded.material.as_deref(), Some("Polyurethane"));
        assert_eq!(loaded.competitor_parts, vec!["ABC-123".to_string()]);
        assert_eq!(loaded.category_id, Some(1));
    }

    #[test]
    fn test_find_part_by_any_number() {
        let store = seeded_store();
        let mut part = Part::new("AXL-STL-THR30-7890");
        part.internal_part_number = "INT-42".to_string();
        part.part_number = "MFG-42".to_string();
        store.insert_part(&part).unwrap();

        for number in ["AXL-STL-THR30-7890", "MFG-42", "INT-42"] {
            let found = store.find_part_by_any_number(number).unwrap();
            assert!(found.is_some(), "lookup by {} failed", number);
        }
        assert!(store.find_part_by_any_number("NOPE").unwrap().is_none());
    }

    #[test]
    fn test_update_part_attributes_is_partial() {
        let store = seeded_store();
        let mut part = Part::new("WHL-1");
        part.category_id = Some(1);
        part.size = Some("4-inch".to_string());
        store.insert_part(&part).unwrap();

        store
            .update_part_attributes("WHL-1", Some("Rubber"), None, None, None)
            .unwrap();

        let loaded = store.get_part("WHL-1").unwrap().unwrap();
        assert_eq!(loaded.material.as_deref(), Some("Rubber"));
        // Size was not part of the update and must survive
        assert_eq!(loaded.size.as_deref(), Some("4-inch"));
    }

    #[test]
    fn test_update_missing_part_errors() {
        let store = seeded_store();
        let err = store
            .update_usage("GHOST", Some("ACME"), None, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::PartNotFound(_)));
    }

    #[test]
    fn test_extraction_candidates_filter_and_limit() {
        let store = seeded_store();
        for i in 0..5 {
            let mut part = Part::new(&format!("WHL-CAND-{}", i));
            part.category_id = Some(1);
            store.insert_part(&part).unwrap();
        }
        // Already-extracted and uncategorized parts are not candidates
        let mut done = Part::new("WHL-DONE");
        done.category_id = Some(1);
        done.material = Some("Steel".to_string());
        store.insert_part(&done).unwrap();
        store.insert_part(&Part::new("ORPHAN")).unwrap();

        assert_eq!(store.extraction_candidates(100).unwrap().len(), 5);
        assert_eq!(store.extraction_candidates(3).unwrap().len(), 3);
        assert_eq!(store.count_extraction_candidates().unwrap(), 5);
        assert_eq!(store.count_uncategorized().unwrap(), 1);
    }

    #[test]
    fn test_parts_cache_serves_stale_until_invalidated() {
        let mut store = seeded_store();
        let mut part = Part::new("RIG-1");
        part.category_id = Some(2);
        store.insert_part(&part).unwrap();

        assert_eq!(store.parts_for_category(2).unwrap().len(), 1);

        // A second insert is invisible through the warm cache
        let mut late = Part::new("RIG-2");
        late.category_id = Some(2);
        store.insert_part(&late).unwrap();
        assert_eq!(store.parts_for_category(2).unwrap().len(), 1);

        store.invalidate_parts_cache();
        assert_eq!(store.parts_for_category(2).unwrap().len(), 2);
    }

    #[test]
    fn test_compatibility_rules_resolve_category_names() {
        let store = seeded_store();
        let rules = store.compatibility_rules().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].condition_category, "Rigs");
        assert_eq!(rules[0].target_category, "Axles");
        assert_eq!(rules[1].condition_category, "Wheels");
    }

    #[test]
    fn test_list_parts_filters() {
        let store = seeded_store();
        let mut a = Part::new("WHL-A");
        a.category_id = Some(1);
        a.material = Some("Rubber".to_string());
        a.vendor = Some("ACME".to_string());
        store.insert_part(&a).unwrap();

        let mut b = Part::new("WHL-B");
        b.category_id = Some(1);
        b.material = Some("Steel".to_string());
        store.insert_part(&b).unwrap();

        let rubber = store
            .list_parts(&PartFilter {
                material: Some("Rubber".to_string()),
                ..PartFilter::default()
            })
            .unwrap();
        assert_eq!(rubber.len(), 1);
        assert_eq!(rubber[0].id, "WHL-A");

        let hits = store
            .list_parts(&PartFilter {
                search: Some("WHL".to_string()),
                ..PartFilter::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 2);
    }
}
