//! Generic name mapping
//!
//! Rewrites specific ingredient names ("roma tomato") to their generic form
//! ("tomato"). The same map type handles unit synonyms ("cups" -> "cup").

use std::collections::HashMap;

use crate::models::IngredientRow;
use crate::tables::{normalize_key, Table, TableResult};

/// Name -> generic name lookup with chains already resolved
#[derive(Debug, Clone, Default)]
pub struct GenericNames {
    map: HashMap<String, String>,
}

impl GenericNames {
    /// Build from (name, generic) pairs.
    ///
    /// Chains are followed to their last name so that mapping is idempotent.
    /// Names caught in a cycle are left unmapped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut raw: HashMap<String, String> = HashMap::new();
        for (name, generic) in pairs {
            let name = normalize_key(name.as_ref());
            let generic = normalize_key(generic.as_ref());
            if name.is_empty() || generic.is_empty() || name == generic {
                continue;
            }
            // First mapping wins
            raw.entry(name).or_insert(generic);
        }

        let mut map = HashMap::with_capacity(raw.len());
        for name in raw.keys() {
            let mut current = name;
            let mut steps = 0;
            while let Some(next) = raw.get(current) {
                current = next;
                steps += 1;
                if steps > raw.len() {
                    break;
                }
            }

            if steps > raw.len() {
                tracing::warn!("Generic name cycle involving '{}', leaving it unmapped", name);
                continue;
            }
            map.insert(name.clone(), current.clone());
        }

        Self { map }
    }

    /// Load from a table with `Name` and `Generic` columns
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        let generic_col = table.require_column("Generic")?;
        Ok(Self::from_pairs(
            table
                .records()
                .map(|r| (r.get(name_col), r.get(generic_col))),
        ))
    }

    /// Generic form of a name, or the name itself when unmapped
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Rewrite each name in place
    pub fn map_names<'s, I>(&self, names: I)
    where
        I: IntoIterator<Item = &'s mut String>,
    {
        for name in names {
            if let Some(generic) = self.map.get(name.as_str()) {
                *name = generic.clone();
            }
        }
    }

    /// Rewrite the ingredient names of each row
    pub fn map_rows(&self, rows: &mut [IngredientRow]) {
        self.map_names(rows.iter_mut().map(|r| &mut r.name));
    }

    /// Rewrite the units of each row
    pub fn map_units(&self, rows: &mut [IngredientRow]) {
        self.map_names(rows.iter_mut().map(|r| &mut r.unit));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_maps_known_names() {
        let names = GenericNames::from_pairs([("Roma Tomato", "tomato"), ("scallion", "green onion")]);
        assert_eq!(names.apply("roma tomato"), "tomato");
        assert_eq!(names.apply("scallion"), "green onion");
        assert_eq!(names.apply("carrot"), "carrot");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let names = GenericNames::from_pairs([
            ("roma tomato", "plum tomato"),
            ("plum tomato", "tomato"),
            ("cilantro leaves", "cilantro"),
        ]);
        for input in ["roma tomato", "plum tomato", "cilantro leaves", "tomato", "basil"] {
            let once = names.apply(input);
            assert_eq!(names.apply(once), once);
        }
        assert_eq!(names.apply("roma tomato"), "tomato");
    }

    #[test]
    fn test_cycles_are_left_unmapped() {
        let names = GenericNames::from_pairs([("a", "b"), ("b", "a"), ("c", "d")]);
        assert_eq!(names.apply("a"), "a");
        assert_eq!(names.apply("b"), "b");
        assert_eq!(names.apply("c"), "d");
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_map_rows_and_units() {
        let table = Table::parse("Name,Generic\ncups,cup\nTbsp,tbsp\n", "unit_names.csv").unwrap();
        let units = GenericNames::from_table(&table).unwrap();
        let names = GenericNames::from_pairs([("yellow onion", "onion")]);

        let mut rows = vec![
            IngredientRow::new("yellow onion", 1.0, "cups"),
            IngredientRow::new("garlic", 2.0, "clove"),
        ];
        names.map_rows(&mut rows);
        units.map_units(&mut rows);

        assert_eq!(rows[0].name, "onion");
        assert_eq!(rows[0].unit, "cup");
        assert_eq!(rows[1].name, "garlic");
        assert_eq!(rows[1].unit, "clove");
    }
}
