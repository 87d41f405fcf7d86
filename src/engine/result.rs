//! Lazy query results
//!
//! A `QueryResult` holds the text of a statement that planned successfully,
//! bound to its session. Rows are produced when the result is written to a
//! file (which consumes the handle) or explicitly materialized with `collect`,
//! `count_rows` or `preview`. Each of those plans the SQL again, so it sees the
//! catalog as it is then, not as it was when `Session::sql` ran.

use super::{quote_literal, Session};
use crate::error::{Error, Result};
use crate::types::{ColumnInfo, ParquetCompression};
use serde_json::Value;
use std::path::Path;

pub use duckdb::arrow::record_batch::RecordBatch;

/// Unmaterialized tabular result bound to its session
pub struct QueryResult<'a> {
    session: &'a Session,
    sql: String,
}

impl<'a> QueryResult<'a> {
    pub(crate) fn new(session: &'a Session, sql: String) -> Self {
        Self { session, sql }
    }

    /// SQL text of the planned statement
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Result columns and their engine types, without running the query
    pub fn schema(&self) -> Result<Vec<ColumnInfo>> {
        let describe_sql = format!("DESCRIBE SELECT * FROM (\n{}\n) AS q", self.sql);
        let mut stmt = self.session.connection().prepare(&describe_sql)?;

        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(columns)
    }

    /// Execute the query and materialize every row as Arrow record batches
    pub fn collect(&self) -> Result<Vec<RecordBatch>> {
        let mut stmt = self.session.connection().prepare(&self.sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }

    /// Execute the query and count its rows
    pub fn count_rows(&self) -> Result<usize> {
        let count_sql = format!("SELECT COUNT(*) FROM (\n{}\n) AS q", self.sql);
        let count: i64 = self
            .session
            .connection()
            .query_row(&count_sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Execute the query and return up to `limit` rows as JSON objects
    pub fn preview(&self, limit: usize) -> Result<Vec<Value>> {
        let temp_file = std::env::temp_dir().join(format!(
            "sql_pipeline_preview_{}_{}.json",
            std::process::id(),
            unique_suffix()
        ));

        let copy_sql = format!(
            "COPY (SELECT * FROM (\n{}\n) AS q LIMIT {limit}) TO {} (FORMAT JSON, ARRAY true);",
            self.sql,
            quote_literal(&temp_file.to_string_lossy())
        );

        let exported = self.session.connection().execute_batch(&copy_sql);
        let content = exported
            .map_err(Error::from)
            .and_then(|()| std::fs::read_to_string(&temp_file).map_err(Error::from));
        let _ = std::fs::remove_file(&temp_file);
        let content = content?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the result to a Parquet file
    pub fn write_parquet(
        self,
        path: impl AsRef<Path>,
        compression: ParquetCompression,
    ) -> Result<usize> {
        let options = format!("FORMAT PARQUET, COMPRESSION '{}'", compression.as_sql());
        self.copy_to(path.as_ref(), &options)
    }

    /// Write the result to a CSV file, optionally preceded by a header row
    pub fn write_csv(self, path: impl AsRef<Path>, with_header: bool) -> Result<usize> {
        let options = format!("FORMAT CSV, HEADER {with_header}");
        self.copy_to(path.as_ref(), &options)
    }

    /// Write the result as newline-delimited JSON
    pub fn write_json(self, path: impl AsRef<Path>) -> Result<usize> {
        self.copy_to(path.as_ref(), "FORMAT JSON")
    }

    /// Run the query into a file with DuckDB's `COPY ... TO`, returning the row count
    fn copy_to(self, path: &Path, options: &str) -> Result<usize> {
        let copy_sql = format!(
            "COPY (\n{}\n) TO {} ({options});",
            self.sql,
            quote_literal(&path.to_string_lossy())
        );

        tracing::debug!("Executing export: {}", copy_sql);

        let rows = self.session.connection().execute(&copy_sql, [])?;
        Ok(rows)
    }
}

impl std::fmt::Debug for QueryResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryResult").field("sql", &self.sql).finish()
    }
}

/// Nanosecond timestamp used to keep temporary file names apart
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{timestamp:x}")
}
