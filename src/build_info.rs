//! Build stamp
//!
//! Identifies which shoplist binary produced a list. Printed when a run
//! starts and embedded in the JSON export.

use std::path::Path;

use serde::Serialize;

/// Compile time in RFC 3339 (UTC), set by `build.rs`
pub const COMPILED_AT: &str = match option_env!("SHOPLIST_COMPILED_AT") {
    Some(s) => s,
    None => "unknown",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub compiled_at: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            compiled_at: COMPILED_AT,
        }
    }

    /// `shoplist 1.0.0 (compiled ...) reading /srv/groceries`
    pub fn run_banner(&self, root: &Path) -> String {
        format!(
            "{} {} (compiled {}) reading {}",
            self.name,
            self.version,
            self.compiled_at,
            root.display()
        )
    }
}
