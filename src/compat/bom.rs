//! Session-scoped Bill of Materials
//!
//! The BOM is never persisted: it lives for one session, keyed by part id
//! in insertion order, and leaves the process only through CSV export.

use std::io::Write;

use crate::catalog::Part;

/// One BOM line: a part snapshot with its category name and quantity
#[derive(Debug, Clone)]
pub struct BomItem {
    pub part: Part,
    pub category_name: String,
    pub quantity: u32,
}

/// An insertion-ordered, quantity-annotated list of selected parts
#[derive(Default)]
pub struct Bom {
    items: Vec<BomItem>,
}

/// Fixed export header; every value is quoted on output
const EXPORT_HEADER: [&str; 7] = [
    "Part Number",
    "Name",
    "Category",
    "Material",
    "Type",
    "Size",
    "Quantity",
];

impl Bom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. Adding a part already on the BOM increments its quantity
    /// instead of creating a second line.
    pub fn add(&mut self, part: Part, category_name: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.part.id == part.id) {
            item.quantity += 1;
        } else {
            self.items.push(BomItem {
                part,
                category_name: category_name.to_string(),
                quantity: 1,
            });
        }
    }

    /// Remove a line by part id. Returns whether a line was removed.
    pub fn remove(&mut self, part_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.part.id != part_id);
        self.items.len() != before
    }

    /// Set a line's quantity, clamped to at least 1
    pub fn set_quantity(&mut self, part_id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.part.id == part_id) {
            item.quantity = quantity.max(1);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[BomItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the BOM as CSV with the fixed header, all values quoted
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(writer);

        wtr.write_record(EXPORT_HEADER)?;
        for item in &self.items {
            let quantity = item.quantity.to_string();
            wtr.write_record([
                item.part.part_number.as_str(),
                item.part.name.as_str(),
                item.category_name.as_str(),
                item.part.material.as_deref().unwrap_or(""),
                item.part.part_type.as_deref().unwrap_or(""),
                item.part.size.as_deref().unwrap_or(""),
                quantity.as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render the CSV export to a string
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel() -> Part {
        let mut part = Part::new("WHL-PUR-STA40-1234");
        part.name = "Standard 4\" Polyurethane Wheel".to_string();
        part.material = Some("Polyurethane".to_string());
        part.part_type = Some("Standard".to_string());
        part.size = Some("4-inch".to_string());
        part
    }

    #[test]
    fn test_add_then_repeat_add_increments_quantity() {
        let mut bom = Bom::new();
        bom.add(wheel(), "Wheels");
        bom.add(wheel(), "Wheels");

        assert_eq!(bom.len(), 1);
        assert_eq!(bom.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove() {
        let mut bom = Bom::new();
        bom.add(wheel(), "Wheels");
        assert!(bom.remove("WHL-PUR-STA40-1234"));
        assert!(bom.is_empty());
        assert!(!bom.remove("WHL-PUR-STA40-1234"));
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut bom = Bom::new();
        bom.add(wheel(), "Wheels");
        bom.set_quantity("WHL-PUR-STA40-1234", 5);
        assert_eq!(bom.items()[0].quantity, 5);

        bom.set_quantity("WHL-PUR-STA40-1234", 0);
        assert_eq!(bom.items()[0].quantity, 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut bom = Bom::new();
        bom.add(wheel(), "Wheels");
        bom.add(Part::new("AXL-STL-THR30-7890"), "Axles");
        bom.add(wheel(), "Wheels");

        let ids: Vec<&str> = bom.items().iter().map(|i| i.part.id.as_str()).collect();
        assert_eq!(ids, vec!["WHL-PUR-STA40-1234", "AXL-STL-THR30-7890"]);
    }

    #[test]
    fn test_csv_export_header_and_quoting() {
        let mut bom = Bom::new();
        bom.add(wheel(), "Wheels");
        let mut axle = Part::new("AXL-STL-THR30-7890");
        axle.name = "Steel Threaded Axle".to_string();
        bom.add(axle, "Axles");

        let csv = bom.to_csv_string().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Part Number\",\"Name\",\"Category\",\"Material\",\"Type\",\"Size\",\"Quantity\""
        );

        let first = lines.next().unwrap();
        assert!(first.starts_with("\"WHL-PUR-STA40-1234\""));
        assert!(first.ends_with("\"1\""));

        // Absent attributes export as empty quoted fields
        let second = lines.next().unwrap();
        assert!(second.contains("\"\",\"\",\"\""));
    }
}
