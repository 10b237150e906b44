//! Unit conversion module
//!
//! Table-driven conversions into each ingredient's preferred grocery unit.

pub mod converter;
pub mod units;

pub use converter::{
    convert_amount, convert_rows, ConversionError, ConversionReport, ConversionTables,
};
pub use units::{ConversionMatrix, CrossDomainEntry, CrossDomainTable, UnitDomain};
