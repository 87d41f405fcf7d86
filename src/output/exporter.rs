//! Query result exporter
//!
//! Resolves the destination path and serializes a `QueryResult` with the
//! engine's writer for the requested format.

use super::construct_path;
use crate::engine::QueryResult;
use crate::error::Result;
use crate::types::{FileFormat, ParquetCompression};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where an export should be written.
///
/// An explicit `path` wins over `base_path` + `file_name`; with neither, the
/// export goes to `output.<ext>` in the current directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: Option<PathBuf>,
    pub base_path: Option<PathBuf>,
    pub file_name: Option<String>,
}

impl ExportTarget {
    /// Target an explicit file path
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Target `<base_path>/<file_name>.<ext>`
    pub fn in_dir(base_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            path: None,
            base_path: Some(base_path.into()),
            file_name: Some(file_name.into()),
        }
    }

    /// Resolve the concrete file path for `format`
    pub fn resolve(&self, format: FileFormat) -> PathBuf {
        construct_path(
            self.path.as_deref(),
            self.base_path.as_deref(),
            self.file_name.as_deref(),
            format.extension(),
        )
    }
}

/// Fully resolved description of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub file_type: FileFormat,
    pub resolved_path: PathBuf,
    /// Only meaningful for CSV
    pub with_header: bool,
}

impl ExportSpec {
    /// Resolve a target into a spec
    pub fn new(file_type: FileFormat, target: &ExportTarget, with_header: bool) -> Self {
        Self {
            file_type,
            resolved_path: target.resolve(file_type),
            with_header,
        }
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: FileFormat,
    /// Rows reported written by the engine
    pub rows: usize,
}

/// Writes query results to Parquet, CSV or JSON files
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    compression: ParquetCompression,
}

impl Exporter {
    /// Create an exporter with default settings (snappy Parquet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Parquet compression codec
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Get the Parquet compression codec
    pub fn compression(&self) -> ParquetCompression {
        self.compression
    }

    /// Export a result, naming the format as a string (`parquet`, `csv`, `json`).
    ///
    /// An unknown format is rejected before anything is written.
    pub fn export(
        &self,
        result: QueryResult<'_>,
        file_type: &str,
        target: &ExportTarget,
        with_header: bool,
    ) -> Result<ExportReport> {
        let format: FileFormat = file_type.parse()?;
        self.export_as(result, format, target, with_header)
    }

    /// Export a result in an already-decided format
    pub fn export_as(
        &self,
        result: QueryResult<'_>,
        format: FileFormat,
        target: &ExportTarget,
        with_header: bool,
    ) -> Result<ExportReport> {
        let spec = ExportSpec::new(format, target, with_header);
        self.write(result, &spec)
    }

    /// Materialize and serialize a result as described by `spec`
    pub fn write(&self, result: QueryResult<'_>, spec: &ExportSpec) -> Result<ExportReport> {
        let path: &Path = &spec.resolved_path;

        let rows = match spec.file_type {
            FileFormat::Parquet => result.write_parquet(path, self.compression)?,
            FileFormat::Csv => result.write_csv(path, spec.with_header)?,
            FileFormat::Json => result.write_json(path)?,
        };

        tracing::info!(rows, "File written to: {}", path.display());

        Ok(ExportReport {
            path: spec.resolved_path.clone(),
            format: spec.file_type,
            rows,
        })
    }
}
