//! Ingredient row model
//!
//! One line of a recipe's ingredient table, and later of the cart.

use serde::{Deserialize, Serialize};

/// An ingredient with amount, unit and originating recipe(s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// Comma-joined names of the recipes this line came from
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl IngredientRow {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            recipe: String::new(),
            category: None,
        }
    }

    /// Builder-style recipe tag
    pub fn with_recipe(mut self, recipe: impl Into<String>) -> Self {
        self.recipe = recipe.into();
        self
    }

    /// Individual recipe names from the comma-joined tag
    pub fn recipes(&self) -> impl Iterator<Item = &str> {
        self.recipe
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Whether this line came (at least partly) from the given recipe
    pub fn has_recipe(&self, recipe: &str) -> bool {
        self.recipes().any(|r| r == recipe.trim())
    }

    /// Append a recipe tag. Empty tags on either side never leave a stray comma.
    pub fn append_recipe(&mut self, recipe: &str) {
        let recipe = recipe.trim();
        if recipe.is_empty() {
            return;
        }
        if self.recipe.trim().is_empty() {
            self.recipe = recipe.to_string();
        } else {
            self.recipe.push(',');
            self.recipe.push_str(recipe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_recipe() {
        let mut row = IngredientRow::new("flour", 2.0, "cup").with_recipe("A");
        row.append_recipe("B");
        assert_eq!(row.recipe, "A,B");
        assert!(row.has_recipe("B"));
        assert!(!row.has_recipe("C"));
    }

    #[test]
    fn test_append_recipe_with_missing_tags() {
        let mut row = IngredientRow::new("flour", 2.0, "cup");
        row.append_recipe("");
        assert_eq!(row.recipe, "");
        row.append_recipe("B");
        assert_eq!(row.recipe, "B");
        assert_eq!(row.recipes().collect::<Vec<_>>(), vec!["B"]);
    }
}
