//! Query engine module
//!
//! Embedded DuckDB session used for table registration, SQL planning and
//! file export.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Session` - Owns one in-memory DuckDB connection and its catalog
//! - `QueryResult` - Lazy handle to a planned (not yet executed) query
//!
//! Registered tables are views over `read_parquet` / `read_csv_auto` /
//! `read_json_auto`, so data files are scanned when a query runs, not when
//! they are registered.

mod result;
mod session;

pub use result::{QueryResult, RecordBatch};
pub use session::Session;

/// Quote an identifier for use in DuckDB SQL
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal for use in DuckDB SQL
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
