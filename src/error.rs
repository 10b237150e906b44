//! Top-level error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::tables::TableError;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for run operations
pub type ShopResult<T> = Result<T, ShopError>;
