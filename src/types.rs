//! Common types used throughout the SQL pipeline
//!
//! This module contains shared type definitions used across the catalog,
//! engine, output and batch modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// File Format
// ============================================================================

/// Tabular file format understood by the engine, both for reading and writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Apache Parquet
    #[default]
    Parquet,
    /// Comma separated values
    Csv,
    /// Newline-delimited JSON
    Json,
}

impl FileFormat {
    /// All supported formats
    pub const ALL: [FileFormat; 3] = [FileFormat::Parquet, FileFormat::Csv, FileFormat::Json];

    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Parquet => "parquet",
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }

    /// Detect the format of a data file from its extension (case-insensitive).
    ///
    /// Glob patterns such as `data/*.parquet` are detected from the final
    /// component, so multi-file datasets register like single files.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "parquet" => Ok(FileFormat::Parquet),
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "" => Err(Error::unsupported_file_type(path.display().to_string(), "")),
            _ => Err(Error::unsupported_file_type(
                path.display().to_string(),
                format!(".{extension}"),
            )),
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "parquet" => Ok(FileFormat::Parquet),
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            _ => Err(Error::unsupported_format(s)),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Parquet Compression
// ============================================================================

/// Compression codec used when exporting Parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    Uncompressed,
}

impl ParquetCompression {
    /// Codec name as understood by `COPY ... (COMPRESSION '...')`
    pub fn as_sql(self) -> &'static str {
        match self {
            ParquetCompression::Snappy => "snappy",
            ParquetCompression::Zstd => "zstd",
            ParquetCompression::Gzip => "gzip",
            ParquetCompression::Uncompressed => "uncompressed",
        }
    }
}

// ============================================================================
// SQL File Ordering
// ============================================================================

/// Order in which a batch visits the `.sql` files of a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlFileOrder {
    /// Sorted by file name
    #[default]
    Sorted,
    /// Whatever order the file system returns
    Filesystem,
}

// ============================================================================
// Catalog Types
// ============================================================================

/// A table registered in the session catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredTable {
    /// Name the table is queryable under
    pub table_name: String,
    /// Data file (or glob) backing the table
    pub source_path: PathBuf,
    /// Format detected from the source path
    pub format: FileFormat,
}

/// Name and engine type of one result column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}
