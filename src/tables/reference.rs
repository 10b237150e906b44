//! Reference tables
//!
//! Every lookup table is read once at startup into [`ReferenceTables`] and
//! only borrowed afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::delimited::{Table, TableError, TableResult};
use super::normalize_key;
use crate::conversion::{ConversionMatrix, ConversionTables, CrossDomainTable, UnitDomain};
use crate::naming::GenericNames;

pub const GROCERY_UNITS_FILE: &str = "grocery_units.csv";
pub const GENERIC_NAMES_FILE: &str = "generic_names.csv";
pub const UNIT_NAMES_FILE: &str = "unit_names.csv";
pub const STOP_FOODS_FILE: &str = "stop_foods.txt";
pub const MASS_TO_MASS_FILE: &str = "mass_to_mass.csv";
pub const VOLUME_TO_VOLUME_FILE: &str = "volume_to_volume.csv";
pub const VOLUME_TO_MASS_FILE: &str = "volume_to_mass.csv";
pub const MASS_TO_VOLUME_FILE: &str = "mass_to_volume.csv";

/// Preferred shopping unit for one ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryUnit {
    pub name: String,
    pub unit: String,
    pub category: Option<String>,
}

impl GroceryUnit {
    pub fn new(name: &str, unit: &str, category: Option<&str>) -> Self {
        Self {
            name: normalize_key(name),
            unit: normalize_key(unit),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}

/// Ingredient name -> preferred unit (and category)
#[derive(Debug, Clone, Default)]
pub struct GroceryUnits {
    by_name: HashMap<String, GroceryUnit>,
}

impl GroceryUnits {
    /// Load from a table with `Name`, `Unit` and optional `Category` columns
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        let unit_col = table.require_column("Unit")?;
        let category_col = table.column("Category");

        let mut out = Self::default();
        for record in table.records() {
            let name = record.get(name_col);
            let unit = record.get(unit_col);
            if name.is_empty() || unit.is_empty() {
                continue;
            }
            let category = category_col.map(|c| record.get(c));
            out.insert(GroceryUnit::new(name, unit, category));
        }
        Ok(out)
    }

    /// Add a preference. The first entry for a name wins.
    pub fn insert(&mut self, unit: GroceryUnit) {
        if self.by_name.contains_key(&unit.name) {
            tracing::debug!("Duplicate grocery unit for {}, keeping the first", unit.name);
            return;
        }
        self.by_name.insert(unit.name.clone(), unit);
    }

    pub fn get(&self, name: &str) -> Option<&GroceryUnit> {
        self.by_name.get(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Ingredients never put on the list
#[derive(Debug, Clone, Default)]
pub struct StopFoods {
    names: HashSet<String>,
}

impl StopFoods {
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        Ok(table.records().map(|r| r.get(name_col)).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopFoods {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|s| normalize_key(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// All read-only lookup tables for one run
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub grocery_units: GroceryUnits,
    pub conversions: ConversionTables,
    pub generic_names: GenericNames,
    pub unit_names: GenericNames,
    pub stop_foods: StopFoods,
}

impl ReferenceTables {
    /// Load every reference table from a directory.
    ///
    /// All tables are required except the unit synonym table.
    pub fn load<P: AsRef<Path>>(dir: P) -> TableResult<Self> {
        let dir = dir.as_ref();

        let grocery_units = GroceryUnits::from_table(&Table::load(dir.join(GROCERY_UNITS_FILE))?)?;
        let generic_names = GenericNames::from_table(&Table::load(dir.join(GENERIC_NAMES_FILE))?)?;
        let stop_foods = StopFoods::from_table(&Table::load(dir.join(STOP_FOODS_FILE))?)?;

        let unit_names = match Table::load(dir.join(UNIT_NAMES_FILE)) {
            Ok(table) => GenericNames::from_table(&table)?,
            Err(TableError::NotFound { .. }) => {
                tracing::debug!("No {} found, unit synonyms disabled", UNIT_NAMES_FILE);
                GenericNames::default()
            }
            Err(e) => return Err(e),
        };

        let conversions = ConversionTables {
            dry: ConversionMatrix::from_table(
                &Table::load(dir.join(MASS_TO_MASS_FILE))?,
                UnitDomain::Dry,
            )?,
            wet: ConversionMatrix::from_table(
                &Table::load(dir.join(VOLUME_TO_VOLUME_FILE))?,
                UnitDomain::Wet,
            )?,
            volume_to_mass: CrossDomainTable::from_table(&Table::load(
                dir.join(VOLUME_TO_MASS_FILE),
            )?)?,
            mass_to_volume: CrossDomainTable::from_table(&Table::load(
                dir.join(MASS_TO_VOLUME_FILE),
            )?)?,
        };

        tracing::info!(
            "Loaded reference tables: {} grocery units, {} generic names, {} unit synonyms, {} stop foods",
            grocery_units.len(),
            generic_names.len(),
            unit_names.len(),
            stop_foods.len()
        );

        Ok(Self {
            grocery_units,
            conversions,
            generic_names,
            unit_names,
            stop_foods,
        })
    }
}
