//! Run configuration
//!
//! Resolves the data root and the table, recipe and output paths under it.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Optional configuration file inside the data root
pub const CONFIG_FILE: &str = "shoplist.json";

/// Environment variable naming the data root
pub const ROOT_ENV: &str = "SHOPLIST_ROOT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of `shoplist.json`. Relative paths resolve against the data root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    pub tables_dir: PathBuf,
    pub recipes_dir: PathBuf,
    pub output: PathBuf,
    pub csv_output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            tables_dir: PathBuf::from("tables"),
            recipes_dir: PathBuf::from("recipes"),
            output: PathBuf::from("shopping_list.txt"),
            csv_output: None,
            json_output: None,
        }
    }
}

/// Absolute paths for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub root: PathBuf,
    pub tables_dir: PathBuf,
    pub recipes_dir: PathBuf,
    pub output: PathBuf,
    pub csv_output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
}

impl ShopConfig {
    /// Read `shoplist.json` from the root, or use defaults when it is absent
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self, ConfigError> {
        let path = root.as_ref().join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Resolve every path against the root
    pub fn resolve<P: AsRef<Path>>(&self, root: P) -> RunPaths {
        let root = root.as_ref();
        RunPaths {
            root: root.to_path_buf(),
            tables_dir: root.join(&self.tables_dir),
            recipes_dir: root.join(&self.recipes_dir),
            output: root.join(&self.output),
            csv_output: self.csv_output.as_ref().map(|p| root.join(p)),
            json_output: self.json_output.as_ref().map(|p| root.join(p)),
        }
    }
}

impl RunPaths {
    /// Load the config file from `root` and resolve it
    pub fn from_root<P: AsRef<Path>>(root: P) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        Ok(ShopConfig::load(root)?.resolve(root))
    }

    /// Path of a recipe's ingredient table
    pub fn recipe_file(&self, recipe: &str) -> PathBuf {
        self.recipes_dir.join(format!("{}.csv", recipe))
    }
}

/// Get the data root from the first argument, the environment, or a `data`
/// directory at the project root
pub fn resolve_root(arg: Option<&str>) -> PathBuf {
    if let Some(arg) = arg {
        return PathBuf::from(arg);
    }

    std::env::var(ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let paths = RunPaths::from_root(dir.path()).unwrap();
        assert_eq!(paths.tables_dir, dir.path().join("tables"));
        assert_eq!(paths.output, dir.path().join("shopping_list.txt"));
        assert_eq!(paths.csv_output, None);
        assert_eq!(paths.recipe_file("Pozole"), dir.path().join("recipes").join("Pozole.csv"));
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "output": "out/list.txt", "csv_output": "out/list.csv" }"#,
        )
        .unwrap();

        let config = ShopConfig::load(dir.path()).unwrap();
        assert_eq!(config.tables_dir, PathBuf::from("tables"));

        let paths = config.resolve(dir.path());
        assert_eq!(paths.output, dir.path().join("out/list.txt"));
        assert_eq!(paths.csv_output, Some(dir.path().join("out/list.csv")));
        assert_eq!(paths.json_output, None);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "outptu": "x" }"#).unwrap();
        assert!(matches!(
            ShopConfig::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_resolve_root_prefers_argument() {
        assert_eq!(resolve_root(Some("/srv/groceries")), PathBuf::from("/srv/groceries"));
    }
}
