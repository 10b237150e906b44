//! shoplist library
//!
//! Turns selected recipe ingredient tables into one merged grocery list.

pub mod build_info;
pub mod config;
pub mod conversion;
pub mod driver;
pub mod error;
pub mod models;
pub mod naming;
pub mod output;
pub mod tables;

pub use error::{ShopError, ShopResult};
