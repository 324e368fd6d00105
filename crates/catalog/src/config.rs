//! Catalog configuration via `silcat.toml`
//!
//! Configuration is process-local: it changes how queries behave and how the
//! diagnostic dump looks, but it is never part of the attribute form, so two
//! processes exchanging a catalog may use different settings.

use serde::{Deserialize, Serialize};
use sil_core::{Error, Result};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "silcat.toml";

/// Catalog configuration loaded from `silcat.toml`.
///
/// # Example
///
/// ```toml
/// attach_synthesized_maps = true
/// matrix_cell_separator = "/"
/// dump_member_limit = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Re-derive `maps_in`/`maps_out` for array group members on `region()`.
    #[serde(default = "default_attach")]
    pub attach_synthesized_maps: bool,
    /// Joins row and column names of a matrix cell.
    #[serde(default = "default_separator")]
    pub matrix_cell_separator: String,
    /// Maximum member handles printed per grouping by the dump.
    #[serde(default = "default_dump_member_limit")]
    pub dump_member_limit: usize,
}

fn default_attach() -> bool {
    true
}

fn default_separator() -> String {
    "/".to_string()
}

fn default_dump_member_limit() -> usize {
    32
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            attach_synthesized_maps: default_attach(),
            matrix_cell_separator: default_separator(),
            dump_member_limit: default_dump_member_limit(),
        }
    }
}

impl CatalogConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# SIL catalog configuration
#
# Re-derive inbound/outbound grouping references for regions synthesized
# from array groups (default: true). Set to false to always take the
# cheap path.
attach_synthesized_maps = true

# Separator between row and column region names of a matrix cell.
matrix_cell_separator = "/"

# Maximum number of member handles printed per grouping by the dump.
dump_member_limit = 32
"#
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.matrix_cell_separator.is_empty() {
            return Err(Error::Config(
                "matrix_cell_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CatalogConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
