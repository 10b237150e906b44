//! Unit tables and conversion factor lookup
//!
//! Provides the dry/wet factor matrices and the per-ingredient cross-domain
//! tables used to move between mass and volume.

use std::collections::{HashMap, HashSet};

use crate::tables::{normalize_key, Table, TableResult};

/// Measurement domain of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitDomain {
    /// Mass units (g, oz, lb, kg)
    Dry,
    /// Volume units (cup, tbsp, tsp, fl oz)
    Wet,
}

impl UnitDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitDomain::Dry => "dry",
            UnitDomain::Wet => "wet",
        }
    }
}

// ============================================================================
// Same-domain factor matrix
// ============================================================================

/// Factor matrix converting among the units of one domain.
///
/// Loaded from a table whose `ToUnits` column names the target unit of each
/// row and whose remaining columns are source units:
///
/// ```text
/// ToUnits,g,oz,lb
/// g,1,28.3495,453.592
/// lb,0.00220462,0.0625,1
/// ```
#[derive(Debug, Clone)]
pub struct ConversionMatrix {
    domain: UnitDomain,
    units: HashSet<String>,
    /// (to, from) -> factor
    factors: HashMap<(String, String), f64>,
}

impl ConversionMatrix {
    pub fn new(domain: UnitDomain) -> Self {
        Self {
            domain,
            units: HashSet::new(),
            factors: HashMap::new(),
        }
    }

    /// Build a matrix from a loaded table
    pub fn from_table(table: &Table, domain: UnitDomain) -> TableResult<Self> {
        let to_col = table.require_column("ToUnits")?;
        let mut matrix = Self::new(domain);

        let sources: Vec<(usize, String)> = table
            .headers()
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != to_col && !h.trim().is_empty())
            .map(|(i, h)| (i, normalize_key(h)))
            .collect();

        for (_, from) in &sources {
            matrix.units.insert(from.clone());
        }

        for record in table.records() {
            let to = normalize_key(record.get(to_col));
            if to.is_empty() {
                continue;
            }
            matrix.units.insert(to.clone());

            for (idx, from) in &sources {
                if let Some(factor) = record.number(*idx)? {
                    matrix.factors.insert((to.clone(), from.clone()), factor);
                }
            }
        }

        Ok(matrix)
    }

    /// Add a single factor (to <- from)
    pub fn insert(&mut self, from: &str, to: &str, factor: f64) {
        let from = normalize_key(from);
        let to = normalize_key(to);
        self.units.insert(from.clone());
        self.units.insert(to.clone());
        self.factors.insert((to, from), factor);
    }

    pub fn domain(&self) -> UnitDomain {
        self.domain
    }

    /// Whether the unit belongs to this matrix's domain
    pub fn has_unit(&self, unit: &str) -> bool {
        self.units.contains(&normalize_key(unit))
    }

    /// Factor converting one `from` into `to`. Identical units give 1.
    pub fn factor(&self, from: &str, to: &str) -> Option<f64> {
        let from = normalize_key(from);
        let to = normalize_key(to);
        if from == to && self.units.contains(&from) {
            return Some(1.0);
        }
        self.factors.get(&(to, from)).copied()
    }
}

// ============================================================================
// Cross-domain (ingredient specific) table
// ============================================================================

/// One cross-domain row: a target unit and factors keyed by source unit
#[derive(Debug, Clone, Default)]
pub struct CrossDomainEntry {
    pub to_unit: String,
    pub factors: HashMap<String, f64>,
}

/// Ingredient-specific factors (densities) between mass and volume.
///
/// Columns: `Name`, `ToUnits`, then one column per source unit.
#[derive(Debug, Clone, Default)]
pub struct CrossDomainTable {
    entries: HashMap<String, Vec<CrossDomainEntry>>,
}

impl CrossDomainTable {
    pub fn from_table(table: &Table) -> TableResult<Self> {
        let name_col = table.require_column("Name")?;
        let to_col = table.require_column("ToUnits")?;

        let sources: Vec<(usize, String)> = table
            .headers()
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != name_col && *i != to_col && !h.trim().is_empty())
            .map(|(i, h)| (i, normalize_key(h)))
            .collect();

        let mut out = Self::default();
        for record in table.records() {
            let name = normalize_key(record.get(name_col));
            let to_unit = normalize_key(record.get(to_col));
            if name.is_empty() || to_unit.is_empty() {
                continue;
            }

            let mut entry = CrossDomainEntry {
                to_unit,
                factors: HashMap::new(),
            };
            for (idx, from) in &sources {
                if let Some(factor) = record.number(*idx)? {
                    entry.factors.insert(from.clone(), factor);
                }
            }
            out.entries.entry(name).or_default().push(entry);
        }

        Ok(out)
    }

    /// Add a factor for one ingredient (to <- from)
    pub fn insert(&mut self, name: &str, from: &str, to: &str, factor: f64) {
        let to = normalize_key(to);
        let rows = self.entries.entry(normalize_key(name)).or_default();
        match rows.iter_mut().find(|e| e.to_unit == to) {
            Some(entry) => {
                entry.factors.insert(normalize_key(from), factor);
            }
            None => {
                let mut entry = CrossDomainEntry {
                    to_unit: to,
                    factors: HashMap::new(),
                };
                entry.factors.insert(normalize_key(from), factor);
                rows.push(entry);
            }
        }
    }

    /// All rows for an ingredient
    pub fn entries_for(&self, name: &str) -> &[CrossDomainEntry] {
        self.entries
            .get(&normalize_key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
