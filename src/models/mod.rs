//! Data models
//!
//! Ingredient rows and the shopping cart they accumulate into.

mod cart;
mod ingredient;

pub use cart::{Cart, MergeOutcome};
pub use ingredient::IngredientRow;
