//! Catalog module - part and category types plus attribute inference

pub mod attributes;
pub mod categorizer;
pub mod category;
pub mod numbering;
pub mod part;

pub use attributes::{detect_bearing_type, detect_material, detect_size, detect_type};
pub use categorizer::{categorize, CategoryMatch};
pub use category::{default_categories, Category, WHEELS_CATEGORY_ID};
pub use numbering::generate_part_number;
pub use part::Part;
