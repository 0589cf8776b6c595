//! Category reference data

use serde::{Deserialize, Serialize};

/// Category id for Wheels - the only category with bearing-type attributes
pub const WHEELS_CATEGORY_ID: i64 = 1;

/// A top-level part grouping (Wheels, Rigs, Axles, ...)
///
/// Categories are immutable reference data, seeded once at `cct init`
/// and looked up by id or name everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(id: i64, name: &str, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The built-in category set used to seed a new catalog
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Wheels", "All types of caster wheels"),
        Category::new(2, "Rigs", "Swivel and rigid rigs"),
        Category::new(3, "Axles", "All types of axles"),
        Category::new(4, "Top Hats", "Top hat components"),
        Category::new(5, "Brakes", "Braking systems"),
        Category::new(6, "Swivel Locks", "Locking mechanisms"),
        Category::new(7, "Thread Guards", "Thread protection"),
        Category::new(8, "Toe Guards", "Toe protection"),
        Category::new(9, "Brush Guards", "Brush guards and protectors"),
    ]
}
