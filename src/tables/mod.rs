//! Table loading module
//!
//! Delimited text parsing plus the reference, pantry and recipe tables
//! loaded once per run.

pub mod delimited;
pub mod reference;
pub mod selection;

pub use delimited::{parse_number, parse_rows, write_row, Record, Table, TableError, TableResult};
pub use reference::{GroceryUnit, GroceryUnits, ReferenceTables, StopFoods};
pub use selection::{load_recipe, Pantry, PantryItem, RecipeSelection};

/// Normalize a lookup key: trimmed and lower-cased
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
