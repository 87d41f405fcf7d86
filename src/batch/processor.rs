//! Folder-of-SQL batch processor

use crate::error::{Error, Result};
use crate::output::{ExportReport, ExportTarget};
use crate::pipeline::Pipeline;
use crate::types::{FileFormat, SqlFileOrder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Write a header row when exporting CSV
    pub with_header: bool,
    /// Order in which SQL files are processed
    pub order: SqlFileOrder,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            with_header: true,
            order: SqlFileOrder::Sorted,
        }
    }
}

/// One SQL file and the export it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryExport {
    pub sql_file: PathBuf,
    #[serde(flatten)]
    pub export: ExportReport,
}

/// Outcome of a completed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub exports: Vec<QueryExport>,
}

impl BatchReport {
    /// Number of files exported
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Whether the batch found no SQL files
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Total rows written across all exports
    pub fn total_rows(&self) -> usize {
        self.exports.iter().map(|e| e.export.rows).sum()
    }
}

/// List the `*.sql` files directly inside `sql_dir`
pub fn list_sql_files(sql_dir: impl AsRef<Path>, order: SqlFileOrder) -> Result<Vec<PathBuf>> {
    let sql_dir = sql_dir.as_ref();
    let entries = fs::read_dir(sql_dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: sql_dir.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }

    if order == SqlFileOrder::Sorted {
        files.sort();
    }
    Ok(files)
}

/// Run every SQL file in `sql_dir` and export each result to
/// `<export_dir>/<file stem>.<format>`.
///
/// The export directory is created if missing. The first failing file stops
/// the batch; files exported before it stay on disk.
pub fn process_queries(
    pipeline: &Pipeline,
    sql_dir: impl AsRef<Path>,
    export_dir: impl AsRef<Path>,
    format: FileFormat,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let sql_dir = sql_dir.as_ref();
    let export_dir = export_dir.as_ref();
    let batch_start = Instant::now();

    tracing::info!("Starting to process SQL queries from folder: {}", sql_dir.display());

    fs::create_dir_all(export_dir)?;

    let mut report = BatchReport::default();
    for sql_file in list_sql_files(sql_dir, options.order)? {
        let export = process_file(pipeline, &sql_file, export_dir, format, options)
            .map_err(|e| Error::query(&sql_file, e))?;

        tracing::info!("Exported results to: {}", export.path.display());
        report.exports.push(QueryExport { sql_file, export });
    }

    tracing::info!(
        files = report.len(),
        elapsed_ms = batch_start.elapsed().as_millis() as u64,
        "Finished processing all SQL queries"
    );
    Ok(report)
}

/// Query and export a single SQL file
fn process_file(
    pipeline: &Pipeline,
    sql_file: &Path,
    export_dir: &Path,
    format: FileFormat,
    options: &BatchOptions,
) -> Result<ExportReport> {
    let file_name = sql_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| Error::config(format!("Invalid SQL file name: {}", sql_file.display())))?;

    tracing::info!("Executing query from file: {}", sql_file.display());

    let sql = fs::read_to_string(sql_file)?;
    let result = pipeline.run_query(&sql)?;

    let target = ExportTarget::path(export_dir.join(format!("{file_name}.{format}")));
    pipeline.export_as(result, format, &target, options.with_header)
}
