//! Shopping cart model
//!
//! Accumulates ingredient rows across recipes, combining lines that share
//! a name and unit.

use serde::Serialize;

use super::IngredientRow;

/// What [`Cart::add`] did with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Added to the existing line at this index
    Merged(usize),
    /// Appended as a new line
    Appended,
    /// Appended because the name already had more than one line
    AppendedAmbiguous,
    /// Appended because the single existing line uses another unit
    AppendedUnitMismatch,
}

/// Ordered shopping cart
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<IngredientRow>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a row into the cart.
    ///
    /// With exactly one line of the same name and the same unit the amounts
    /// are summed and the recipe tag appended. Every other case appends the
    /// row as its own line; units are never mixed.
    pub fn add(&mut self, row: IngredientRow) -> MergeOutcome {
        let matches: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.name == row.name)
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => {
                self.lines.push(row);
                MergeOutcome::Appended
            }
            [idx] if self.lines[*idx].unit == row.unit => {
                let line = &mut self.lines[*idx];
                line.amount += row.amount;
                line.append_recipe(&row.recipe);
                if line.category.is_none() {
                    line.category = row.category;
                }
                MergeOutcome::Merged(*idx)
            }
            [_] => {
                tracing::debug!(
                    "{} already listed in another unit, adding {} as a separate line",
                    row.name,
                    row.unit
                );
                self.lines.push(row);
                MergeOutcome::AppendedUnitMismatch
            }
            _ => {
                tracing::debug!(
                    "{} has {} lines already, adding a separate line",
                    row.name,
                    matches.len()
                );
                self.lines.push(row);
                MergeOutcome::AppendedAmbiguous
            }
        }
    }

    /// Stable sort by ingredient name
    pub fn sort_by_name(&mut self) {
        self.lines.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// All lines for an ingredient name
    pub fn find(&self, name: &str) -> Vec<&IngredientRow> {
        self.lines.iter().filter(|l| l.name == name).collect()
    }

    /// A new cart holding only the lines tagged with `recipe`
    pub fn for_recipe(&self, recipe: &str) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|l| l.has_recipe(recipe))
                .cloned()
                .collect(),
        }
    }

    pub fn lines(&self) -> &[IngredientRow] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, amount: f64, unit: &str, recipe: &str) -> IngredientRow {
        IngredientRow::new(name, amount, unit).with_recipe(recipe)
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(row("flour", 1.0, "g", "A")), MergeOutcome::Appended);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_merge_same_name_and_unit() {
        let mut cart = Cart::new();
        cart.add(row("flour", 240.0, "g", "A"));
        assert_eq!(cart.add(row("flour", 500.0, "g", "B")), MergeOutcome::Merged(0));

        assert_eq!(cart.len(), 1);
        let line = &cart.lines()[0];
        assert!((line.amount - 740.0).abs() < 0.001);
        assert_eq!(line.recipe, "A,B");
    }

    #[test]
    fn test_unit_mismatch_appends() {
        let mut cart = Cart::new();
        cart.add(row("onion", 1.0, "each", "A"));
        assert_eq!(
            cart.add(row("onion", 1.0, "cup", "B")),
            MergeOutcome::AppendedUnitMismatch
        );
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].amount, 1.0);
    }

    #[test]
    fn test_multiple_matches_append() {
        let mut cart = Cart::new();
        cart.add(row("onion", 1.0, "each", "A"));
        cart.add(row("onion", 1.0, "cup", "B"));
        assert_eq!(
            cart.add(row("onion", 2.0, "each", "C")),
            MergeOutcome::AppendedAmbiguous
        );
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.find("onion").len(), 3);
    }

    #[test]
    fn test_merge_with_missing_recipe_tag() {
        let mut cart = Cart::new();
        cart.add(row("rice", 1.0, "cup", ""));
        cart.add(row("rice", 1.0, "cup", "B"));
        assert_eq!(cart.lines()[0].recipe, "B");
        assert_eq!(cart.lines()[0].amount, 2.0);
    }

    #[test]
    fn test_sort_is_stable_by_name() {
        let mut cart = Cart::new();
        for r in [
            row("tomato", 1.0, "each", "A"),
            row("basil", 1.0, "oz", "A"),
            row("onion", 1.0, "each", "A"),
            row("onion", 1.0, "cup", "B"),
        ] {
            cart.add(r);
        }
        cart.sort_by_name();
        let names: Vec<_> = cart.lines().iter().map(|l| (l.name.as_str(), l.unit.as_str())).collect();
        assert_eq!(
            names,
            vec![("basil", "oz"), ("onion", "each"), ("onion", "cup"), ("tomato", "each")]
        );
    }

    #[test]
    fn test_for_recipe_and_find() {
        let mut cart = Cart::new();
        cart.add(row("apple", 2.0, "each", "recipe1"));
        cart.add(row("apple", 3.0, "each", "recipe2"));
        cart.add(row("banana", 1.0, "each", "recipe2"));

        let r1 = cart.for_recipe("recipe1");
        assert_eq!(r1.len(), 1);
        assert_eq!(r1.lines()[0].name, "apple");

        let r2 = cart.for_recipe("recipe2");
        assert_eq!(r2.len(), 2);
        assert!(cart.for_recipe("nonexistent").is_empty());

        let apples = cart.find("apple");
        assert_eq!(apples.len(), 1);
        assert_eq!(apples[0].amount, 5.0);
        assert!(cart.find("carrot").is_empty());
    }
}
