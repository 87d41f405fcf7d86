//! Pipeline configuration
//!
//! This module contains the structures used to describe a batch run in YAML:
//! which data files to register, where the SQL lives and how to export.

use crate::batch::BatchOptions;
use crate::error::{Error, Result};
use crate::output::Exporter;
use crate::types::{FileFormat, ParquetCompression, SqlFileOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Pipeline Config
// ============================================================================

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Data files to register, in order
    #[serde(default)]
    pub tables: Vec<TableConfig>,

    /// Folder containing `.sql` files
    pub sql_dir: PathBuf,

    /// Folder exports are written to (created if missing)
    pub export_dir: PathBuf,

    /// Format for every export
    #[serde(default)]
    pub export_format: FileFormat,

    /// Write a header row when exporting CSV
    #[serde(default = "default_true")]
    pub with_header: bool,

    /// Parquet compression codec
    #[serde(default)]
    pub compression: ParquetCompression,

    /// Order in which SQL files are processed
    #[serde(default)]
    pub order: SqlFileOrder,
}

fn default_true() -> bool {
    true
}

/// One data file to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name used in SQL
    pub name: String,

    /// Data file path or glob (`*.parquet`)
    pub path: PathBuf,
}

impl PipelineConfig {
    /// Paths of all configured tables
    pub fn table_paths(&self) -> Vec<&Path> {
        self.tables.iter().map(|t| t.path.as_path()).collect()
    }

    /// Names of all configured tables
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Batch loop settings
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            with_header: self.with_header,
            order: self.order,
        }
    }

    /// Exporter configured with this pipeline's settings
    pub fn exporter(&self) -> Exporter {
        Exporter::new().with_compression(self.compression)
    }

    /// Make relative paths relative to `base` instead of the working directory
    #[must_use]
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        };

        self.sql_dir = resolve(&self.sql_dir);
        self.export_dir = resolve(&self.export_dir);
        for table in &mut self.tables {
            table.path = resolve(&table.path);
        }
        self
    }

    /// Check the config for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.sql_dir.as_os_str().is_empty() {
            return Err(Error::config("sql_dir cannot be empty"));
        }

        if self.export_dir.as_os_str().is_empty() {
            return Err(Error::config("export_dir cannot be empty"));
        }

        for (index, table) in self.tables.iter().enumerate() {
            if table.name.trim().is_empty() {
                return Err(Error::config(format!("Table #{} has an empty name", index + 1)));
            }
            if table.path.as_os_str().is_empty() {
                return Err(Error::config(format!(
                    "Table '{}' path cannot be empty",
                    table.name
                )));
            }
        }

        Ok(())
    }
}

/// Load a pipeline config from a YAML file.
///
/// Relative paths inside the file are resolved against the file's directory.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(load_config_from_str(&content)?.resolve_paths(base))
}

/// Load a pipeline config from a YAML string (paths are left as written)
pub fn load_config_from_str(yaml: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
