//! DuckDB-backed engine session
//!
//! A `Session` is the explicit replacement for a process-wide engine
//! context: it is created once, passed by reference, and its catalog lives
//! exactly as long as the value does.

use super::{quote_identifier, quote_literal, QueryResult};
use crate::error::{Error, Result};
use crate::types::FileFormat;
use duckdb::Connection;
use std::path::Path;

/// Embedded query engine session
pub struct Session {
    /// DuckDB connection
    conn: Connection,
}

impl Session {
    /// Open a session backed by an in-memory DuckDB database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self { conn })
    }

    /// Register a Parquet file (or glob of files) as a table
    pub fn register_parquet(&self, table_name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.register(table_name, path, FileFormat::Parquet)
    }

    /// Register a CSV file (first row is the header) as a table
    pub fn register_csv(&self, table_name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.register(table_name, path, FileFormat::Csv)
    }

    /// Register a newline-delimited or array JSON file as a table
    pub fn register_json(&self, table_name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.register(table_name, path, FileFormat::Json)
    }

    /// Register a data file under `table_name` using the reader for `format`.
    ///
    /// Registering an existing name replaces the previous table.
    pub fn register(
        &self,
        table_name: &str,
        path: impl AsRef<Path>,
        format: FileFormat,
    ) -> Result<()> {
        let source = path.as_ref().to_string_lossy();
        let literal = quote_literal(&source);

        let scan = match format {
            FileFormat::Parquet => format!("read_parquet({literal})"),
            FileFormat::Csv => format!("read_csv_auto({literal}, header = true)"),
            FileFormat::Json => format!("read_json_auto({literal})"),
        };

        let create_sql = format!(
            "CREATE OR REPLACE VIEW {} AS SELECT * FROM {scan};",
            quote_identifier(table_name)
        );

        tracing::debug!("Registering table: {}", create_sql);

        self.conn.execute_batch(&create_sql)?;
        Ok(())
    }

    /// Plan a SQL statement and return a lazy handle to its result.
    ///
    /// The text must hold exactly one statement; a trailing terminator and
    /// comments after it are dropped. The statement is prepared so syntax
    /// errors and unknown tables surface here. Nothing is executed until the
    /// result is exported or collected, and that step plans the SQL again
    /// against the catalog as it is at that moment.
    pub fn sql(&self, query: &str) -> Result<QueryResult<'_>> {
        let query = single_statement(query)?;

        tracing::debug!("Planning query: {}", query);

        self.conn.prepare(&query)?;
        Ok(QueryResult::new(self, query))
    }

    /// Check whether a table or view is visible in the catalog
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
            duckdb::params![table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Underlying DuckDB connection
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Extract the single statement held by `query`, without its terminator.
///
/// Semicolons inside string literals, quoted identifiers and comments do not
/// split statements. Segments holding only comments or whitespace are ignored.
fn single_statement(query: &str) -> Result<String> {
    let statements = split_statements(query);
    match statements.as_slice() {
        [] => Err(Error::config("SQL statement is empty")),
        [statement] => Ok((*statement).to_string()),
        _ => Err(Error::config(format!(
            "Expected a single SQL statement, found {}",
            statements.len()
        ))),
    }
}

fn split_statements(query: &str) -> Vec<&str> {
    let bytes = query.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut has_code = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => {
                has_code = true;
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 1;
            }
            b';' => {
                if has_code {
                    statements.push(query[start..i].trim());
                }
                start = i + 1;
                has_code = false;
            }
            b if !b.is_ascii_whitespace() => has_code = true,
            _ => {}
        }
        i += 1;
    }

    if has_code {
        statements.push(query[start..].trim());
    }
    statements
}
