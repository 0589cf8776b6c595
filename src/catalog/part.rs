//! Part record type - a single catalog item (wheel, rig, axle, or accessory)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog part, identified by its manufacturer part number.
///
/// Attribute fields (`material`, `part_type`, `size`, `bearing_type`) stay
/// unset until categorization and attribute extraction have run. Which of
/// them is expected to be populated depends on the part's category; this is
/// a convention, not a schema constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier (= manufacturer part number)
    pub id: String,

    /// Manufacturer part number
    pub part_number: String,

    /// Internal part number
    pub internal_part_number: String,

    /// Display name
    pub name: String,

    /// Category, unset until categorization runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Only meaningful for Wheels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_capacity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Equivalent competitor part numbers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitor_parts: Vec<String>,

    /// Wheel part numbers this part is known to pair with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatible_wheels: Vec<String>,

    /// Rig part numbers this part is known to pair with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatible_rigs: Vec<String>,

    #[serde(default)]
    pub requires_zerk_axle: bool,

    #[serde(default)]
    pub requires_stainless_components: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_requirements: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_12_month_usage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_monthly_usage: Option<f64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Create a bare part with the part number doubling as id, internal
    /// number and placeholder name
    pub fn new(part_number: &str) -> Self {
        let now = Utc::now();
        Self {
            id: part_number.to_string(),
            part_number: part_number.to_string(),
            internal_part_number: part_number.to_string(),
            name: part_number.to_string(),
            category_id: None,
            material: None,
            part_type: None,
            size: None,
            bearing_type: None,
            load_capacity: None,
            vendor: None,
            competitor_parts: Vec::new(),
            compatible_wheels: Vec::new(),
            compatible_rigs: Vec::new(),
            requires_zerk_axle: false,
            requires_stainless_components: false,
            other_requirements: None,
            image_url: None,
            rolling_12_month_usage: None,
            avg_monthly_usage: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up an attribute value by name, as compatibility rules do.
    ///
    /// Unknown attribute names read as absent, so they can never satisfy
    /// a rule's value comparison.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "material" => self.material.as_deref(),
            "type" => self.part_type.as_deref(),
            "size" => self.size.as_deref(),
            "bearing_type" => self.bearing_type.as_deref(),
            "load_capacity" => self.load_capacity.as_deref(),
            "vendor" => self.vendor.as_deref(),
            _ => None,
        }
    }

    /// Text the attribute detectors scan: part number plus name, as entered
    pub fn search_text(&self) -> String {
        format!("{} {}", self.part_number, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_part_uses_number_everywhere() {
        let part = Part::new("WHL-PUR-STA40-1234");
        assert_eq!(part.id, "WHL-PUR-STA40-1234");
        assert_eq!(part.part_number, "WHL-PUR-STA40-1234");
        assert_eq!(part.internal_part_number, "WHL-PUR-STA40-1234");
        assert_eq!(part.name, "WHL-PUR-STA40-1234");
        assert!(part.category_id.is_none());
        assert!(part.material.is_none());
    }

    #[test]
    fn test_attribute_lookup() {
        let mut part = Part::new("AXL-SST-ZER40-2345");
        part.material = Some("Stainless Steel".to_string());
        part.part_type = Some("Zerk".to_string());

        assert_eq!(part.attribute("material"), Some("Stainless Steel"));
        assert_eq!(part.attribute("type"), Some("Zerk"));
        assert_eq!(part.attribute("size"), None);
        assert_eq!(part.attribute("no_such_attribute"), None);
    }

    #[test]
    fn test_type_field_serializes_as_type() {
        let mut part = Part::new("RIG-STL-SWI30-9012");
        part.part_type = Some("Swivel".to_string());

        let yaml = serde_yml::to_string(&part).unwrap();
        assert!(yaml.contains("type: Swivel"));

        let parsed: Part = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.part_type.as_deref(), Some("Swivel"));
    }

    #[test]
    fn test_roundtrip_preserves_sequences() {
        let mut part = Part::new("WHL-RBR-STA50-5678");
        part.competitor_parts = vec!["ABC-123".to_string(), "XYZ-456".to_string()];
        part.requires_zerk_axle = true;

        let json = serde_json::to_string(&part).unwrap();
        let parsed: Part = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.competitor_parts, part.competitor_parts);
        assert!(parsed.requires_zerk_axle);
    }
}
