//! Pantry, recipe selection and recipe ingredient tables

use std::path::Path;

use serde::Serialize;

use super::delimited::{Table, TableError, TableResult};
use super::normalize_key;
use crate::models::IngredientRow;

pub const PANTRY_FILE: &str = "pantry.csv";
pub const RECIPE_LIST_FILE: &str = "recipe_list.csv";

/// One pantry inventory line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PantryItem {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// Pantry inventory. Reported alongside the run, not used for filtering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Pantry {
    items: Vec<PantryItem>,
}

impl Pantry {
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        Self::from_table(&Table::load(path)?)
    }

    /// Columns: `Name`, optional `Amount` and `Unit`
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        let amount_col = table.column("Amount");
        let unit_col = table.column("Unit");

        let mut items = Vec::new();
        for record in table.records() {
            let name = normalize_key(record.get(name_col));
            if name.is_empty() {
                continue;
            }
            let amount = match amount_col {
                Some(c) => record.number(c)?,
                None => None,
            };
            let unit = unit_col
                .map(|c| normalize_key(record.get(c)))
                .filter(|u| !u.is_empty());
            items.push(PantryItem { name, amount, unit });
        }

        Ok(Self { items })
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize_key(name);
        self.items.iter().any(|i| i.name == name)
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Recipe names and whether each is selected for this run
#[derive(Debug, Clone, Default)]
pub struct RecipeSelection {
    entries: Vec<(String, bool)>,
}

impl RecipeSelection {
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        Self::from_table(&Table::load(path)?)
    }

    /// Columns: `Name`, `Select`
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        let select_col = table.require_column("Select")?;

        let entries = table
            .records()
            .filter(|r| !r.get(name_col).is_empty())
            .map(|r| {
                let name = r.get(name_col).to_string();
                let selected = parse_flag(r.get(select_col)).unwrap_or_else(|| {
                    tracing::warn!(
                        "{} row {}: unrecognized Select value '{}' for {}, skipping recipe",
                        table.name(),
                        r.row(),
                        r.get(select_col),
                        name
                    );
                    false
                });
                (name, selected)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Names of the selected recipes, in table order
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "x" => Some(true),
        "0" | "false" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}

/// Load one recipe's ingredient table (`Name`, `Amount`, `Unit`).
///
/// Names and units are trimmed and lower-cased. A blank amount is read as 0.
pub fn load_recipe<P: AsRef<Path>>(path: P) -> TableResult<Vec<IngredientRow>> {
    recipe_rows(&Table::load(path)?)
}

pub(crate) fn recipe_rows(table: &Table) -> TableResult<Vec<IngredientRow>> {
    let name_col = table.require_column("Name")?;
    let amount_col = table.require_column("Amount")?;
    let unit_col = table.require_column("Unit")?;

    let mut rows = Vec::with_capacity(table.len());
    for record in table.records() {
        let name = normalize_key(record.get(name_col));
        if name.is_empty() {
            continue;
        }

        let amount = match record.number(amount_col)? {
            Some(a) if a < 0.0 => {
                return Err(TableError::InvalidNumber {
                    table: table.name().to_string(),
                    row: record.row(),
                    column: "Amount".to_string(),
                    value: record.get(amount_col).to_string(),
                });
            }
            Some(a) => a,
            None => {
                tracing::warn!("{} row {}: {} has no amount, using 0", table.name(), record.row(), name);
                0.0
            }
        };

        rows.push(IngredientRow::new(name, amount, normalize_key(record.get(unit_col))));
    }

    Ok(rows)
}
