//! Unit conversion functions
//!
//! Converts ingredient amounts into each ingredient's preferred grocery unit.

use thiserror::Error;

use super::units::{ConversionMatrix, CrossDomainTable, UnitDomain};
use crate::models::IngredientRow;
use crate::tables::{normalize_key, GroceryUnits};

/// Why an amount could not be converted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unit '{unit}' is not in the dry or wet tables")]
    UnknownUnit { unit: String },

    #[error("no {domain} factor from '{from}' to '{to}'")]
    MissingFactor {
        domain: &'static str,
        from: String,
        to: String,
    },

    #[error("no special conversion for '{name}' from '{from}' to '{to}'")]
    NoCrossDomainEntry {
        name: String,
        from: String,
        to: String,
    },

    #[error("special conversion for '{name}' targets '{listed}', not '{to}'")]
    CrossDomainTargetMismatch {
        name: String,
        listed: String,
        to: String,
    },
}

/// The four conversion tables
#[derive(Debug, Clone)]
pub struct ConversionTables {
    /// Mass to mass
    pub dry: ConversionMatrix,
    /// Volume to volume
    pub wet: ConversionMatrix,
    /// Wet source, dry target, per ingredient
    pub volume_to_mass: CrossDomainTable,
    /// Dry source, wet target, per ingredient
    pub mass_to_volume: CrossDomainTable,
}

impl Default for ConversionTables {
    fn default() -> Self {
        Self {
            dry: ConversionMatrix::new(UnitDomain::Dry),
            wet: ConversionMatrix::new(UnitDomain::Wet),
            volume_to_mass: CrossDomainTable::default(),
            mass_to_volume: CrossDomainTable::default(),
        }
    }
}

/// Convert `amount` of ingredient `name` from one unit to another.
///
/// Same-domain conversions use the dry or wet matrix. A wet source with a
/// dry target goes through `volume_to_mass`, a dry source with a wet target
/// through `mass_to_volume`, both keyed by ingredient name.
pub fn convert_amount(
    tables: &ConversionTables,
    name: &str,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    let from = normalize_key(from);
    let to = normalize_key(to);

    if from == to {
        return Ok(amount);
    }

    let from_dry = tables.dry.has_unit(&from);
    let from_wet = tables.wet.has_unit(&from);
    let to_dry = tables.dry.has_unit(&to);
    let to_wet = tables.wet.has_unit(&to);

    if from_dry && to_dry {
        return same_domain(&tables.dry, amount, &from, &to);
    }
    if from_wet && to_wet {
        return same_domain(&tables.wet, amount, &from, &to);
    }
    if from_wet && to_dry {
        return cross_domain(&tables.volume_to_mass, name, amount, &from, &to);
    }
    if from_dry && to_wet {
        return cross_domain(&tables.mass_to_volume, name, amount, &from, &to);
    }

    let unit = if from_dry || from_wet { to } else { from };
    Err(ConversionError::UnknownUnit { unit })
}

fn same_domain(
    matrix: &ConversionMatrix,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    matrix
        .factor(from, to)
        .map(|factor| amount * factor)
        .ok_or_else(|| ConversionError::MissingFactor {
            domain: matrix.domain().as_str(),
            from: from.to_string(),
            to: to.to_string(),
        })
}

fn cross_domain(
    table: &CrossDomainTable,
    name: &str,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    let entries = table.entries_for(name);
    let no_entry = || ConversionError::NoCrossDomainEntry {
        name: normalize_key(name),
        from: from.to_string(),
        to: to.to_string(),
    };

    let Some(first) = entries.first() else {
        return Err(no_entry());
    };

    let Some(entry) = entries.iter().find(|e| e.to_unit == to) else {
        return Err(ConversionError::CrossDomainTargetMismatch {
            name: normalize_key(name),
            listed: first.to_unit.clone(),
            to: to.to_string(),
        });
    };

    entry
        .factors
        .get(from)
        .map(|factor| amount * factor)
        .ok_or_else(no_entry)
}

/// Outcome counts from [`convert_rows`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub missing_preference: usize,
    pub unconverted: usize,
}

impl ConversionReport {
    pub fn warnings(&self) -> usize {
        self.missing_preference + self.unconverted
    }
}

/// Convert each row into its preferred grocery unit.
///
/// Rows without a preference, or without a conversion path, are left as they
/// are and a warning is logged. Categories are filled in from the
/// preference table.
pub fn convert_rows(
    rows: &mut [IngredientRow],
    units: &GroceryUnits,
    tables: &ConversionTables,
) -> ConversionReport {
    let mut report = ConversionReport::default();

    for row in rows.iter_mut() {
        let Some(pref) = units.get(&row.name) else {
            tracing::warn!("{} has no preferred grocery unit", row.name);
            report.missing_preference += 1;
            continue;
        };

        if row.category.is_none() {
            row.category = pref.category.clone();
        }

        if normalize_key(&row.unit) == pref.unit {
            continue;
        }

        match convert_amount(tables, &row.name, row.amount, &row.unit, &pref.unit) {
            Ok(amount) => {
                tracing::debug!(
                    "Converted {} from {} {} to {} {}",
                    row.name,
                    row.amount,
                    row.unit,
                    amount,
                    pref.unit
                );
                row.amount = amount;
                row.unit = pref.unit.clone();
                report.converted += 1;
            }
            Err(e) => {
                tracing::warn!("{} needs special conversion: {}", row.name, e);
                report.unconverted += 1;
            }
        }
    }

    report
}
